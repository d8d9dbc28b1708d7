use super::ValidationError;
use super::text::validate_required;
use crate::content::{KNOWN_ICONS, SiteContent};

/// Rejects content the public site cannot render.
pub fn validate_site_content(content: &SiteContent) -> Result<(), ValidationError> {
    let settings = &content.site_settings;
    validate_required("siteSettings.companyName", &settings.company_name)?;
    validate_required("siteSettings.heroTitle", &settings.hero_title)?;

    for (i, link) in content.nav_links.iter().enumerate() {
        validate_required(&format!("navLinks[{i}].label"), &link.label)?;
        validate_required(&format!("navLinks[{i}].href"), &link.href)?;
    }

    for (i, link) in content.footer_links.iter().enumerate() {
        validate_required(&format!("footerLinks[{i}].label"), &link.label)?;
        validate_required(&format!("footerLinks[{i}].href"), &link.href)?;
    }

    for (i, feature) in content.features.iter().enumerate() {
        validate_required(&format!("features[{i}].title"), &feature.title)?;
        if let Some(icon) = feature.icon.as_deref() {
            if !KNOWN_ICONS.contains(&icon) {
                return Err(ValidationError::UnknownIcon {
                    field: format!("features[{i}].icon"),
                    icon: icon.to_owned(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Locale, NavLink, demo_content};

    #[test]
    fn test_demo_content_is_valid() {
        for locale in Locale::ALL {
            assert!(validate_site_content(&demo_content(locale)).is_ok());
        }
    }

    #[test]
    fn test_blank_company_name_rejected() {
        let mut content = demo_content(Locale::En);
        content.site_settings.company_name = " ".to_owned();
        let err = validate_site_content(&content).unwrap_err();
        assert_eq!(err.field(), "siteSettings.companyName");
    }

    #[test]
    fn test_link_without_href_rejected() {
        let mut content = demo_content(Locale::En);
        content.nav_links.push(NavLink {
            label: "Blog".to_owned(),
            href: String::new(),
            order: None,
        });
        let err = validate_site_content(&content).unwrap_err();
        assert_eq!(err.field(), "navLinks[5].href");
    }

    #[test]
    fn test_unknown_icon_rejected() {
        let mut content = demo_content(Locale::En);
        content.features[0].icon = Some("Rocket".to_owned());
        assert!(matches!(
            validate_site_content(&content),
            Err(ValidationError::UnknownIcon { .. })
        ));
    }
}
