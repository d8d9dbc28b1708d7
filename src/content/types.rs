use serde::{Deserialize, Serialize};

/// Icon names the front end knows how to render.
pub const KNOWN_ICONS: &[&str] = &[
    "HeartHandshake",
    "Code",
    "Layers",
    "RefreshCw",
    "Target",
    "LifeBuoy",
    "TrendingUp",
];

/// Identifier of a list item; legacy content uses both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
    pub brand_primary_light: String,
    pub brand_accent_light: String,
    pub brand_primary_dark: String,
    pub brand_accent_dark: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_cta_label: String,
    pub hero_cta_href: String,
    pub final_cta_title: String,
    pub final_cta_subtitle: String,
    pub final_cta_label: String,
    pub final_cta_href: String,
    #[serde(default)]
    pub contact_title: String,
    #[serde(default)]
    pub contact_subtitle: String,
    #[serde(default)]
    pub feedback_title: String,
    #[serde(default)]
    pub feedback_subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousWork {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub author: String,
    pub role: String,
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Everything the public site renders for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub site_settings: SiteSettings,
    #[serde(default)]
    pub nav_links: Vec<NavLink>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub previous_works: Vec<PreviousWork>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub footer_links: Vec<FooterLink>,
    #[serde(default)]
    pub social_links: SocialLinks,
}

impl SiteContent {
    /// Gives unordered nav links and features their list position, then
    /// sorts both lists by `order`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for (position, link) in self.nav_links.iter_mut().enumerate() {
            link.order.get_or_insert(position_to_order(position));
        }
        for (position, feature) in self.features.iter_mut().enumerate() {
            feature.order.get_or_insert(position_to_order(position));
        }
        self.nav_links.sort_by_key(|link| link.order);
        self.features.sort_by_key(|feature| feature.order);
        self
    }
}

fn position_to_order(position: usize) -> i32 {
    i32::try_from(position).unwrap_or(i32::MAX)
}
