use std::fmt::Write as _;

use greenshelf_core::{BrandForm, ValidationErrors, PRICE_TIERS};

use super::{escape, layout};

fn field_error(errors: &ValidationErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|message| format!(r#"<p class="field-error">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

fn text_input(label: &str, field: &str, value: &str, errors: &ValidationErrors) -> String {
    format!(
        r#"      <label>{label}
        <input type="text" name="{field}" value="{value}">
      </label>
      {error}
"#,
        value = escape(value),
        error = field_error(errors, field),
    )
}

fn price_tier_select(selected: &str, errors: &ValidationErrors) -> String {
    let mut options = String::from(r#"<option value="">Choose a tier</option>"#);
    for tier in PRICE_TIERS {
        let marker = if tier == selected { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{tier}"{marker}>{tier}</option>"#);
    }
    // Tiers stored outside the standard set stay selectable on edit.
    if !selected.is_empty() && !PRICE_TIERS.contains(&selected) {
        let tier = escape(selected);
        let _ = write!(options, r#"<option value="{tier}" selected>{tier}</option>"#);
    }
    format!(
        r#"      <label>Price tier
        <select name="price_tier">{options}</select>
      </label>
      {error}
"#,
        error = field_error(errors, "price_tier"),
    )
}

fn brand_form(
    heading: &str,
    action: &str,
    submit_label: &str,
    form: &BrandForm,
    errors: &ValidationErrors,
) -> String {
    let summary_block = if errors.is_empty() {
        String::new()
    } else {
        r#"    <p class="form-errors">Please fix the highlighted fields.</p>
"#
        .to_string()
    };

    format!(
        r#"    <h1>{heading}</h1>
{summary_block}    <form class="brand-form" method="post" action="{action}">
{name}      <label>Summary
        <textarea name="summary" rows="4">{summary}</textarea>
      </label>
      {summary_error}
{packaging}{price_tier}{website}{country}{certifications}      <button type="submit">{submit_label}</button>
    </form>
"#,
        heading = escape(heading),
        action = escape(action),
        name = text_input("Brand name", "name", &form.name, errors),
        summary = escape(&form.summary),
        summary_error = field_error(errors, "summary"),
        packaging = text_input("Packaging", "packaging", &form.packaging, errors),
        price_tier = price_tier_select(&form.price_tier, errors),
        website = text_input("Website", "website", &form.website, errors),
        country = text_input("Country", "country", &form.country, errors),
        certifications = text_input(
            "Certifications (comma separated)",
            "certifications",
            &form.certifications_text(),
            errors,
        ),
        submit_label = escape(submit_label),
    )
}

/// Blank or re-rendered creation form.
#[must_use]
pub fn submit_page(form: &BrandForm, errors: &ValidationErrors) -> String {
    let content = brand_form("Submit a brand", "/submit", "Submit brand", form, errors);
    layout("Submit a brand", &content)
}

/// Edit form for an existing brand.
#[must_use]
pub fn edit_page(id: i64, form: &BrandForm, errors: &ValidationErrors) -> String {
    let action = format!("/brands/{id}/edit");
    let content = brand_form("Edit brand", &action, "Save changes", form, errors);
    layout("Edit brand", &content)
}

#[cfg(test)]
mod tests {
    use greenshelf_core::validate;

    use super::*;

    #[test]
    fn blank_form_has_no_errors() {
        let html = submit_page(&BrandForm::default(), &ValidationErrors::default());
        assert!(html.contains(r#"action="/submit""#));
        assert!(!html.contains("field-error"));
        assert!(html.contains(r#"<option value="$$">$$</option>"#));
    }

    #[test]
    fn rejected_form_keeps_values_and_shows_messages() {
        let form = BrandForm {
            name: "A".to_string(),
            summary: "short".to_string(),
            website: "not-a-url".to_string(),
            price_tier: "$$$".to_string(),
            ..BrandForm::default()
        };
        let errors = validate(&form);
        let html = submit_page(&form, &errors);

        assert!(html.contains("Brand name must be at least 2 characters."));
        assert!(html.contains("Summary should be at least 10 characters."));
        assert!(html.contains(r#"value="not-a-url""#));
        assert!(html.contains(r#"<option value="$$$" selected>$$$</option>"#));
        assert!(html.contains("Please fix the highlighted fields."));
    }

    #[test]
    fn nonstandard_stored_tier_stays_selected() {
        let form = BrandForm {
            name: "Ethique".to_string(),
            summary: "Plastic-free personal care".to_string(),
            price_tier: "$$$$".to_string(),
            ..BrandForm::default()
        };
        let html = edit_page(4, &form, &ValidationErrors::default());
        assert!(html.contains(r#"<option value="$$$$" selected>$$$$</option>"#));
        assert!(!html.contains(r#"<option value="$$$" selected>"#));
        assert!(validate(&form).get("price_tier").is_none());
    }

    #[test]
    fn edit_form_posts_to_brand_path() {
        let form = BrandForm {
            name: "Tom & Co".to_string(),
            certifications: vec!["Vegan".to_string(), "B Corp".to_string()],
            ..BrandForm::default()
        };
        let html = edit_page(12, &form, &ValidationErrors::default());
        assert!(html.contains(r#"action="/brands/12/edit""#));
        assert!(html.contains(r#"value="Tom &amp; Co""#));
        assert!(html.contains(r#"value="Vegan, B Corp""#));
    }
}
