use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, signed_in: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(BASE_CSS)) }
            }
            body {
              header class="topbar" {
                  h3 { "QuickList" }
                  nav {
                      @if signed_in {
                          a href="/auth/logout" { "Sign out" }
                      } @else {
                          a href="/auth/jobber" { "Sign in with Jobber" }
                      }
                  }
              }
                (content)
            }
        }
    }
}

const BASE_CSS: &str = "
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
.topbar { display: flex; align-items: center; justify-content: space-between; padding: 0.5rem 1.5rem; box-shadow: 0 1px 3px #0002; }
.container { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.narrow { max-width: 480px; }
.card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
fieldset { border: none; padding: 0; margin: 0 0 0.75rem; }
pre { white-space: pre-wrap; background: #f6f6f6; padding: 1rem; border-radius: 6px; }
.error { color: #a00; }
";
