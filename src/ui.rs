use crate::badges::BADGE_CLASS;
use crate::registry::ViewId;
use crate::surface::{
    APP_HEADER, APP_TITLE, AUTH_SECTION, DomSurface, Element, TAB_NAVIGATION, USER_INFO, USER_NAME,
};

const TABS_PER_ROW: usize = 8;

pub fn render_index(surface: &DomSurface) -> String {
    INDEX_HTML
        .replace("{{TITLE}}", &text_of(surface, APP_TITLE))
        .replace("{{HEADER_CLASS}}", &class_of(surface, APP_HEADER))
        .replace("{{USER_INFO_CLASS}}", &class_of(surface, USER_INFO))
        .replace("{{USER_NAME}}", &text_of(surface, USER_NAME))
        .replace("{{AUTH_CLASS}}", &class_of(surface, AUTH_SECTION))
        .replace("{{NAV_CLASS}}", &class_of(surface, TAB_NAVIGATION))
        .replace("{{TABS}}", &render_tabs(surface))
        .replace("{{CONTENT}}", &render_content(surface))
}

fn render_tabs(surface: &DomSurface) -> String {
    let tabs: Vec<_> = surface.tabs().collect();
    tabs.chunks(TABS_PER_ROW)
        .map(|row| {
            let buttons: String = row.iter().map(|(view, tab)| render_tab(*view, tab)).collect();
            format!("<div class=\"tab-row\">{buttons}</div>")
        })
        .collect()
}

fn render_tab(view: ViewId, tab: &Element) -> String {
    let badge = tab
        .child_with_class(BADGE_CLASS)
        .map(|marker| {
            format!(
                "<span class=\"{BADGE_CLASS}\" style=\"{}\">{}</span>",
                escape(&marker.style_text()),
                escape(&marker.text)
            )
        })
        .unwrap_or_default();
    let disabled = if tab.disabled { " disabled" } else { "" };

    format!(
        "<form method=\"post\" action=\"/tabs/{view}\"><button id=\"{}\" class=\"{}\" style=\"{}\"{disabled}>{}{badge}</button></form>",
        escape(&tab.id),
        escape(&classes(tab)),
        escape(&tab.style_text()),
        escape(&tab.text),
    )
}

fn render_content(surface: &DomSurface) -> String {
    surface
        .containers()
        .map(|(_, container)| {
            format!(
                "<section id=\"{}\" class=\"tab-content {}\"><h2>{}</h2></section>",
                escape(&container.id),
                escape(&classes(container)),
                escape(&container.text)
            )
        })
        .collect()
}

fn classes(element: &Element) -> String {
    element.class_list().collect::<Vec<_>>().join(" ")
}

fn class_of(surface: &DomSurface, id: &str) -> String {
    surface.get(id).map(classes).unwrap_or_default()
}

fn text_of(surface: &DomSurface, id: &str) -> String {
    surface
        .get(id)
        .map(|element| escape(&element.text))
        .unwrap_or_default()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}


const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 20px;
    }

    .hidden {
      display: none !important;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 3.4vw, 2.3rem);
      margin: 0;
    }

    .user {
      display: flex;
      align-items: center;
      gap: 10px;
      color: #5f5c57;
    }

    .tab-row {
      display: flex;
      flex-wrap: wrap;
      border-bottom: 2px solid #ddd;
    }

    .tab-row form {
      display: contents;
    }

    .tab-btn {
      position: relative;
    }

    .tab-btn:disabled {
      pointer-events: none;
    }

    .tab-content {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      min-height: 220px;
    }

    .tab-content h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .login {
      display: grid;
      gap: 12px;
      max-width: 360px;
    }

    .login input {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 12px 14px;
      font: inherit;
    }

    .login button,
    .user button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .user button {
      background: var(--accent-2);
      padding: 8px 14px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header id="appHeader" class="{{HEADER_CLASS}}">
      <h1 id="appTitle">{{TITLE}}</h1>
      <div id="userInfo" class="user {{USER_INFO_CLASS}}">
        <span id="userName">{{USER_NAME}}</span>
        <form method="post" action="/logout"><button type="submit">Sign out</button></form>
      </div>
    </header>

    <section id="authSection" class="{{AUTH_CLASS}}">
      <form class="login" method="post" action="/login">
        <h1>Daily Tracker</h1>
        <input name="display_name" placeholder="Display name" required />
        <input name="email" type="email" placeholder="Email" />
        <button type="submit">Sign in</button>
      </form>
    </section>

    <nav id="tabNavigation" class="{{NAV_CLASS}}">{{TABS}}</nav>

    {{CONTENT}}
  </main>
</body>
</html>
"#;
