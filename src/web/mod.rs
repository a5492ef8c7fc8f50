//! Web server for interactive highlighting

use std::collections::HashMap;

use axum::extract::Form;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use maud::{html, Markup};

use crate::language;
use crate::lexer::tokenize;
use crate::render::{self, STYLESHEET};

/// Name of the form field carrying source text.
const SOURCE_FIELD: &str = "source";

fn editor(source: &str) -> Markup {
    html!(
        form method="post" action="/highlight" {
            textarea name=(SOURCE_FIELD) { (source) }
            button type="submit" { "Highlight" }
        }
    )
}

async fn index() -> Markup {
    render::page(
        language::STATA.title,
        html!(
            h1 { (language::STATA.description) }
            (editor(""))
        ),
    )
}

async fn highlight(Form(fields): Form<HashMap<String, String>>) -> Markup {
    let source = fields.get(SOURCE_FIELD).map(String::as_str).unwrap_or_default();
    tracing::debug!("highlighting {} bytes", source.len());
    render::page(
        language::STATA.title,
        html!(
            (render::highlight(source))
            (editor(source))
        ),
    )
}

async fn tokens(Form(fields): Form<HashMap<String, String>>) -> String {
    let source = fields.get(SOURCE_FIELD).map(String::as_str).unwrap_or_default();
    render::debug_listing(tokenize(source))
}

async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css")], STYLESHEET)
}

pub fn get_server() -> axum::Router {
    axum::Router::new()
        .route("/", get(index))
        .route("/highlight", post(highlight))
        .route("/tokens", post(tokens))
        .route("/style.css", get(stylesheet))
}
