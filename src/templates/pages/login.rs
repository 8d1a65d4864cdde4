use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn login_page() -> Markup {
    desktop_layout(
        "Sign in",
        false,
        html! {
            main class="container narrow" {
                h1 { "Sign in" }
                p class="lead" {
                    "QuickList reads your scheduled visits from Jobber and turns them into a shareable list."
                }
                a href="/auth/jobber" class="primary" { "Sign in with Jobber" }
            }
        },
    )
}
