//! Server-rendered HTML. Every dynamic value goes through [`escape`].

pub mod catalog;
pub mod form;

pub const NOT_FOUND_MESSAGE: &str = "Page not found.";
pub const BRAND_NOT_FOUND_MESSAGE: &str = "Brand not found.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
pub const UNREADABLE_FORM_MESSAGE: &str = "That form submission could not be read.";

/// Escape text for use in element content and quoted attribute values.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared document shell.
#[must_use]
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} · Greenshelf</title>
  <link rel="stylesheet" href="/public/styles.css">
</head>
<body>
  <header class="site-header">
    <a class="logo" href="/">Greenshelf</a>
    <nav>
      <a href="/browse">Browse</a>
      <a href="/submit">Submit a brand</a>
    </nav>
  </header>
  <main>
{content}
  </main>
  <footer class="site-footer">Independent directory of sustainable beauty and personal care brands.</footer>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Error page shown for 404s and failures.
#[must_use]
pub fn error_page(message: &str) -> String {
    let content = format!(
        r#"    <section class="error">
      <h1>{message}</h1>
      <p><a href="/">Back to the directory</a></p>
    </section>"#,
        message = escape(message),
    );
    layout("Error", &content)
}
