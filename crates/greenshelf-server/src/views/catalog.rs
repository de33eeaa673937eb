use std::fmt::Write as _;

use greenshelf_core::{Brand, CertificationCount, DEFAULT_IMAGE_URL};

use super::{escape, layout};

/// Data for one rendering of the browse page.
#[derive(Debug)]
pub struct BrowsePage<'a> {
    pub brands: &'a [Brand],
    pub page: i64,
    pub page_count: i64,
    pub cert_counts: &'a [CertificationCount],
}

fn brand_card(brand: &Brand) -> String {
    let image = brand.image_url.as_deref().unwrap_or(DEFAULT_IMAGE_URL);

    let mut badges = String::new();
    for cert in &brand.certifications {
        let _ = write!(badges, r#"<li class="badge">{}</li>"#, escape(cert));
    }

    let mut details = String::new();
    if let Some(country) = brand.country.as_deref() {
        let _ = write!(details, r#"<span class="country">{}</span>"#, escape(country));
    }
    if let Some(website) = brand.website.as_deref() {
        let _ = write!(
            details,
            r#"<a class="website" href="{url}" rel="noopener">{url}</a>"#,
            url = escape(website)
        );
    }

    format!(
        r#"      <article class="brand-card">
        <img src="{image}" alt="{name}" loading="lazy">
        <div class="brand-body">
          <h2>{name} <span class="price-tier">{price_tier}</span></h2>
          <p class="summary">{summary}</p>
          <p class="packaging">{packaging}</p>
          <ul class="badges">{badges}</ul>
          <p class="details">{details}</p>
          <div class="actions">
            <a href="/brands/{id}/edit">Edit</a>
            <form method="post" action="/brands/{id}/delete">
              <button type="submit">Delete</button>
            </form>
          </div>
        </div>
      </article>
"#,
        image = escape(image),
        name = escape(&brand.name),
        price_tier = escape(&brand.price_tier),
        summary = escape(&brand.summary),
        packaging = escape(&brand.packaging),
        id = brand.id,
    )
}

fn brand_grid(brands: &[Brand]) -> String {
    if brands.is_empty() {
        return r#"    <p class="empty">No brands yet. <a href="/submit">Submit the first one.</a></p>"#
            .to_string();
    }
    let cards: String = brands.iter().map(brand_card).collect();
    format!("    <section class=\"brand-grid\">\n{cards}    </section>")
}

/// Landing page with the newest brands.
#[must_use]
pub fn home(brands: &[Brand]) -> String {
    let content = format!(
        r#"    <section class="hero">
      <h1>Beauty brands that show their work</h1>
      <p>Certifications, packaging and pricing for brands making verifiable sustainability claims.</p>
      <a class="button" href="/browse">Browse the directory</a>
    </section>
    <h2>Recently added</h2>
{grid}"#,
        grid = brand_grid(brands),
    );
    layout("Home", &content)
}

fn pagination(page: i64, page_count: i64) -> String {
    let mut nav = String::from(r#"    <nav class="pagination">"#);
    if page > 1 {
        let _ = write!(nav, r#"<a href="/browse?page={}">Previous</a>"#, page - 1);
    }
    let _ = write!(nav, "<span>Page {page} of {page_count}</span>");
    if page < page_count {
        let _ = write!(nav, r#"<a href="/browse?page={}">Next</a>"#, page + 1);
    }
    nav.push_str("</nav>");
    nav
}

fn certification_sidebar(counts: &[CertificationCount]) -> String {
    let mut items = String::new();
    for cert in counts {
        let _ = write!(
            items,
            r#"<li><span class="cert-name">{}</span> <span class="cert-count">{}</span></li>"#,
            escape(&cert.name),
            cert.count
        );
    }
    format!(
        r#"    <aside class="certifications">
      <h2>Certifications</h2>
      <ul>{items}</ul>
    </aside>"#
    )
}

/// Paginated catalog with certification counts.
#[must_use]
pub fn browse(view: &BrowsePage<'_>) -> String {
    let content = format!(
        "    <h1>Browse brands</h1>\n{sidebar}\n{grid}\n{nav}",
        sidebar = certification_sidebar(view.cert_counts),
        grid = brand_grid(view.brands),
        nav = pagination(view.page, view.page_count),
    );
    layout("Browse", &content)
}
