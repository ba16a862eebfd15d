//! Server-rendered HTML pages.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{Choice, Question};
use crate::poll::was_published_recently;

pub const NO_POLLS_MESSAGE: &str = "No polls are available.";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn results_url(question_id: impl std::fmt::Display) -> String {
    format!("/polls/{question_id}/results/")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

pub fn index(questions: &[Question], now: DateTime<Utc>) -> String {
    if questions.is_empty() {
        return page("Polls", &format!("<p>{NO_POLLS_MESSAGE}</p>\n"));
    }

    let mut body = String::from("<ul>\n");
    for question in questions {
        let badge = if was_published_recently(question, now) {
            " <em>new</em>"
        } else {
            ""
        };
        let _ = writeln!(
            body,
            "<li><a href=\"/polls/{}/\">{}</a>{badge}</li>",
            question.id,
            escape(&question.text)
        );
    }
    body.push_str("</ul>\n");
    page("Polls", &body)
}

pub fn detail(question: &Question, choices: &[Choice], error_message: Option<&str>) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&question.text));
    if let Some(message) = error_message {
        let _ = writeln!(body, "<p><strong>{}</strong></p>", escape(message));
    }

    let _ = writeln!(body, "<form action=\"/polls/{}/vote/\" method=\"post\">", question.id);
    for choice in choices {
        let _ = writeln!(
            body,
            "<input type=\"radio\" name=\"choice\" id=\"choice{id}\" value=\"{id}\">\n<label for=\"choice{id}\">{}</label><br>",
            escape(&choice.text),
            id = choice.id,
        );
    }
    body.push_str("<input type=\"submit\" value=\"Vote\">\n</form>\n");
    page(&question.text, &body)
}

pub fn results(question: &Question, choices: &[Choice]) -> String {
    let mut body = format!("<h1>{}</h1>\n<ul>\n", escape(&question.text));
    for choice in choices {
        let plural = if choice.vote_count == 1 { "" } else { "s" };
        let _ = writeln!(
            body,
            "<li>{} -- {} vote{plural}</li>",
            escape(&choice.text),
            choice.vote_count
        );
    }
    let _ = writeln!(body, "</ul>\n<a href=\"/polls/{}/\">Vote again?</a>", question.id);
    page(&question.text, &body)
}
