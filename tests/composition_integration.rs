//! Resource mounting, custom parsers, error handler precedence, and
//! the request context, exercised through the local gateway.

use std::sync::Arc;

use ampoule::{
	App, Error, ErrorKey, ErrorKind, ParamValue, PathParams, Reply, Request, Resource, Response,
	Result, StatusCode,
};
use ampoule_testing::Gateway;
use serde_json::json;

fn teapot_responder(status: StatusCode) -> ampoule::ErrorResponder {
	Arc::new(move |error: &Error| {
		Response::json(json!({"message": error.message()})).with_status(status)
	})
}

#[test]
fn mounted_resource_serves_its_routes() {
	let mut users = Resource::new("users");
	users
		.get(
			"/users/{user_id:int}",
			|_request: &Request, params: &PathParams| -> Result<Reply> {
				Ok(Reply::Json(json!({
					"user_id": params.get("user_id").and_then(ParamValue::as_int),
				})))
			},
		)
		.unwrap();

	let mut app = App::new("api");
	app.register_resource(users);

	let gateway = Gateway::new(app);
	assert_eq!(gateway.get("/users/42").json().unwrap(), json!({"user_id": 42}));

	let invalid = gateway.get("/users/forty-two");
	assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
	assert_eq!(
		invalid.json().unwrap()["message"],
		"'forty-two' is not a valid int"
	);
}

#[test]
fn resource_error_handler_beats_the_application_one() {
	let mut kitchen = Resource::new("kitchen");
	kitchen
		.get(
			"/kitchen/teapot",
			|_request: &Request, _params: &PathParams| -> Result<Reply> {
				Err(Error::new(ErrorKind::Value, "confused teapot").with_tag("teapot"))
			},
		)
		.unwrap();
	kitchen.error_handler(&[ErrorKey::tag("teapot")], teapot_responder(StatusCode::BAD_GATEWAY));

	let mut app = App::new("api");
	app.error_handler(&[ErrorKey::tag("teapot")], teapot_responder(StatusCode::IM_A_TEAPOT));
	app.get(
		"/teapot",
		|_request: &Request, _params: &PathParams| -> Result<Reply> {
			Err(Error::new(ErrorKind::Value, "short and stout").with_tag("teapot"))
		},
	)
	.unwrap();
	app.register_resource(kitchen);

	let gateway = Gateway::new(app);
	// App-owned route falls through to the application handler.
	assert_eq!(gateway.get("/teapot").status, StatusCode::IM_A_TEAPOT);
	// Resource-owned route is claimed by the resource handler first.
	assert_eq!(gateway.get("/kitchen/teapot").status, StatusCode::BAD_GATEWAY);
}

#[test]
fn kind_handlers_catch_untagged_errors() {
	let mut app = App::new("api");
	app.error_handler(
		&[ErrorKey::from(ErrorKind::Internal)],
		Arc::new(|_error: &Error| {
			Response::json(json!({"message": "Something went wrong"}))
				.with_status(StatusCode::INTERNAL_SERVER_ERROR)
		}),
	);
	app.get(
		"/boom",
		|_request: &Request, _params: &PathParams| -> Result<Reply> {
			Err(Error::internal("database exploded"))
		},
	)
	.unwrap();

	let gateway = Gateway::new(app);
	let response = gateway.get("/boom");
	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	// The responder controls the body; the raw message is not leaked.
	assert_eq!(
		response.json().unwrap(),
		json!({"message": "Something went wrong"})
	);
}

#[test]
fn custom_parser_converts_path_parameters() {
	let mut app = App::new("api");
	app.parser(
		"upper",
		Arc::new(|value: &str| Ok(ParamValue::Str(value.to_uppercase()))),
	)
	.unwrap();
	app.get(
		"/codes/{code:upper}",
		|_request: &Request, params: &PathParams| -> Result<Reply> {
			Ok(Reply::Json(json!({"code": params.get_str("code")})))
		},
	)
	.unwrap();

	let gateway = Gateway::new(app);
	assert_eq!(gateway.get("/codes/abc").json().unwrap(), json!({"code": "ABC"}));
}

#[test]
fn custom_parser_can_produce_structured_values() {
	let mut app = App::new("api");
	app.parser(
		"csv",
		Arc::new(|value: &str| {
			Ok(ParamValue::Json(json!(value.split(',').collect::<Vec<_>>())))
		}),
	)
	.unwrap();
	app.get(
		"/batches/{ids:csv}",
		|_request: &Request, params: &PathParams| -> Result<Reply> {
			Ok(Reply::Json(json!({
				"ids": params.get("ids").and_then(ParamValue::as_json),
			})))
		},
	)
	.unwrap();

	let gateway = Gateway::new(app);
	assert_eq!(
		gateway.get("/batches/1,2,3").json().unwrap(),
		json!({"ids": ["1", "2", "3"]})
	);
}

#[test]
fn uuid_parser_round_trip() {
	let mut app = App::new("api");
	app.get(
		"/users/{user_id:uuid}",
		|_request: &Request, params: &PathParams| -> Result<Reply> {
			Ok(Reply::Json(json!({
				"user_id": params.get("user_id").and_then(ParamValue::as_uuid).map(|u| u.to_string()),
			})))
		},
	)
	.unwrap();

	let gateway = Gateway::new(app);
	let id = "a5f9b1f0-89a2-4a3a-8f3c-0f4d1f2e3a4b";
	assert_eq!(gateway.get(&format!("/users/{id}")).json().unwrap()["user_id"], id);
	assert_eq!(gateway.get("/users/zzz").status, StatusCode::BAD_REQUEST);
}

#[test]
fn error_responders_can_read_the_request_context() {
	let mut app = App::new("api");
	app.error_handler(
		&[ErrorKey::tag("boom")],
		Arc::new(|error: &Error| {
			let path = ampoule::current().map(|request| request.path).ok();
			Response::json(json!({
				"message": error.message(),
				"path": path.as_deref().unwrap_or("<no context>"),
			}))
			.with_status(StatusCode::BAD_REQUEST)
		}),
	);
	app.get(
		"/explode",
		|_request: &Request, _params: &PathParams| -> Result<Reply> {
			Err(Error::new(ErrorKind::Value, "handler exploded").with_tag("boom"))
		},
	)
	.unwrap();

	let gateway = Gateway::new(app);
	let response = gateway.get("/explode");
	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	let body = response.json().unwrap();
	assert_eq!(body["message"], "handler exploded");
	assert_eq!(body["path"], "/explode");
}

#[test]
fn handlers_can_read_the_request_context() {
	let mut app = App::new("api");
	app.get(
		"/whoami",
		|_request: &Request, _params: &PathParams| -> Result<Reply> {
			let current = ampoule::current()?;
			Ok(Reply::Json(json!({
				"function": current.context.function_name,
				"path": current.path,
			})))
		},
	)
	.unwrap();

	let gateway = Gateway::new(app);
	let body = gateway.get("/whoami").json().unwrap();
	assert_eq!(body["function"], "local-function");
	assert_eq!(body["path"], "/whoami");
}

#[test]
fn reply_forms_normalize_uniformly() {
	let mut app = App::new("api");
	app.get(
		"/full",
		|_request: &Request, _params: &PathParams| -> Result<Reply> {
			Ok(Reply::Response(
				Response::json(json!({"ok": true}))
					.with_status(StatusCode::ACCEPTED)
					.with_header("x-custom", "yes"),
			))
		},
	)
	.unwrap();
	app.get(
		"/text",
		|_request: &Request, _params: &PathParams| -> Result<Reply> {
			Ok(Reply::Text("plain text, not JSON".to_string()))
		},
	)
	.unwrap();
	app.get(
		"/empty",
		|_request: &Request, _params: &PathParams| -> Result<Reply> { Ok(Reply::Empty) },
	)
	.unwrap();

	let gateway = Gateway::new(app);

	let full = gateway.get("/full");
	assert_eq!(full.status, StatusCode::ACCEPTED);
	assert_eq!(full.headers.get("x-custom").map(String::as_str), Some("yes"));

	let text = gateway.get("/text");
	assert_eq!(text.body.as_deref(), Some("plain text, not JSON"));

	let empty = gateway.get("/empty");
	assert_eq!(empty.status, StatusCode::OK);
	assert!(empty.body.is_none());
}
