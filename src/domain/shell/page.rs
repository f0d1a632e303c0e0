use super::state::UiState;

const TEMPLATE: &str = include_str!("../../../static/index.html");

/// HTML 본문과 큰따옴표 속성값용 이스케이프
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_presets(presets: &[String], question: &str) -> String {
    presets
        .iter()
        .enumerate()
        .map(|(index, preset)| {
            let class = if preset == question {
                " class=\"selected\""
            } else {
                ""
            };
            format!(
                "        <li><a href=\"/?preset={}\"{}>{}</a></li>",
                index,
                class,
                escape_html(preset)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_message(avatar: &str, text: &str) -> String {
    format!(
        "      <div class=\"message {avatar}\"><span class=\"avatar\">{avatar}</span><span class=\"text\">{}</span></div>",
        escape_html(text)
    )
}

fn render_panel(state: &UiState) -> String {
    match &state.panel {
        Some(exchange) => [
            render_message("human", &exchange.question),
            render_message("assistant", exchange.answer.as_deref().unwrap_or_default()),
        ]
        .join("\n"),
        None => String::new(),
    }
}

fn disabled_attr(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        " disabled"
    }
}

/// `template`의 `{{name}}`을 한 번에 치환 (삽입된 값은 다시 검사하지 않음)
fn fill(template: &str, value_of: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        match after_open.find("}}") {
            Some(close) => {
                let name = &after_open[..close];
                match value_of(name) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[open..open + 4 + close]),
                }
                rest = &after_open[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// 주어진 상태로 전체 페이지 렌더링
pub fn render_page(state: &UiState, presets: &[String]) -> String {
    let controls = state.controls;
    fill(TEMPLATE, |name| match name {
        "presets" => Some(render_presets(presets, &state.question)),
        "panel" => Some(render_panel(state)),
        "question" => Some(escape_html(&state.question)),
        "submit_disabled" => Some(disabled_attr(controls.submit_enabled).to_string()),
        "clear_disabled" => Some(disabled_attr(controls.clear_enabled).to_string()),
        "submit_enabled" => Some(controls.submit_enabled.to_string()),
        "clear_enabled" => Some(controls.clear_enabled.to_string()),
        _ => None,
    })
}
