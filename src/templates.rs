use askama::Template;
use axum::response::Html;

pub const SITE_AUTHOR: &str = "Jesse G.";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: &'static str,
    pub name: &'static str,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub title: &'static str,
    pub name: &'static str,
}

#[derive(Template)]
#[template(path = "help.html")]
pub struct HelpTemplate {
    pub title: &'static str,
    pub message: &'static str,
    pub name: &'static str,
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub title: &'static str,
    pub error_message: &'static str,
    pub name: &'static str,
}

impl NotFoundTemplate {
    pub fn help_article() -> Self {
        Self {
            title: "404: Page Not Found",
            error_message: "Unable to find help article",
            name: SITE_AUTHOR,
        }
    }

    pub fn page() -> Self {
        Self {
            title: "404: Page Not Found",
            error_message: "Unable to find the requested page.",
            name: SITE_AUTHOR,
        }
    }
}

/// Renders a template into an HTML response, degrading to a plain error
/// string instead of panicking when rendering fails.
pub fn render_page<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template rendering error: {}", e);
        format!("Template error: {}", e)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_renders_title_and_author() {
        let html = IndexTemplate {
            title: "Weather App",
            name: SITE_AUTHOR,
        }
        .render()
        .unwrap();

        assert!(html.contains("<title>Weather App</title>"));
        assert!(html.contains("Jesse G."));
    }

    #[test]
    fn help_renders_its_message() {
        let html = HelpTemplate {
            title: "Help",
            message: "This is the help page.",
            name: SITE_AUTHOR,
        }
        .render()
        .unwrap();

        assert!(html.contains("This is the help page."));
    }

    #[test]
    fn not_found_variants_carry_distinct_messages() {
        let help = NotFoundTemplate::help_article().render().unwrap();
        let generic = NotFoundTemplate::page().render().unwrap();

        assert!(help.contains("Unable to find help article"));
        assert!(generic.contains("Unable to find the requested page."));
        assert_ne!(help, generic);
    }
}
