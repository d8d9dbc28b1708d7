//! Bilingual content served until an administrator saves their own.

use super::locale::Locale;
use super::types::{
    Feature, FooterLink, NavLink, PreviousWork, SiteContent, SiteSettings, SocialLinks,
};

const LOGO_PATH: &str = "/images/path55-9.png";

const WORK_IMAGES: [&str; 4] = [
    "https://www.meistertask.com/_next/image?url=https%3A%2F%2Fa.storyblok.com%2Ff%2F289344%2F1521x1001%2F61554d4bfc%2Fui-image_project-management.png%3Fv%3D3&w=3840&q=75",
    "https://i0.wp.com/blogrevamp.cashfree.com/wp-content/uploads/2021/09/integrated-payment-systems.png?fit=5835%2C3001&ssl=1",
    "https://cdn.prod.website-files.com/64bf6aa2443faa46c887a8c0/64dddf954cf92e0dc844b071_time-tracker-app-for-desk-mobile-remote-teams.png",
    "https://www.figma.com/community/resource/667a5295-9efd-41a9-bff3-37cc8dff24c9/thumbnail",
];

const FEATURE_ICONS: [&str; 6] = [
    "HeartHandshake",
    "Code",
    "Layers",
    "RefreshCw",
    "Target",
    "TrendingUp",
];

/// Demo content for `locale`.
pub fn demo_content(locale: Locale) -> SiteContent {
    match locale {
        Locale::En => english(),
        Locale::Ar => arabic(),
    }
}

struct LocaleCopy<'a> {
    settings: [&'a str; 11],
    nav: [(&'a str, &'a str); 5],
    features: [(&'a str, &'a str); 6],
    works: [(&'a str, &'a str); 4],
    footer: [&'a str; 3],
}

fn build(copy: &LocaleCopy<'_>) -> SiteContent {
    let [
        company_name,
        hero_title,
        hero_subtitle,
        hero_cta_label,
        final_cta_title,
        final_cta_subtitle,
        final_cta_label,
        contact_title,
        contact_subtitle,
        feedback_title,
        feedback_subtitle,
    ] = copy.settings;

    SiteContent {
        site_settings: SiteSettings {
            company_name: company_name.to_owned(),
            logo_path: Some(LOGO_PATH.to_owned()),
            brand_primary_light: "#15803d".to_owned(),
            brand_accent_light: "#5c4426".to_owned(),
            brand_primary_dark: "#22c55e".to_owned(),
            brand_accent_dark: "#a07b4a".to_owned(),
            hero_title: hero_title.to_owned(),
            hero_subtitle: hero_subtitle.to_owned(),
            hero_cta_label: hero_cta_label.to_owned(),
            hero_cta_href: "#get-started".to_owned(),
            final_cta_title: final_cta_title.to_owned(),
            final_cta_subtitle: final_cta_subtitle.to_owned(),
            final_cta_label: final_cta_label.to_owned(),
            final_cta_href: "#get-started".to_owned(),
            contact_title: contact_title.to_owned(),
            contact_subtitle: contact_subtitle.to_owned(),
            feedback_title: feedback_title.to_owned(),
            feedback_subtitle: feedback_subtitle.to_owned(),
        },
        nav_links: (0_i32..)
            .zip(copy.nav)
            .map(|(order, (label, href))| NavLink {
                label: label.to_owned(),
                href: href.to_owned(),
                order: Some(order),
            })
            .collect(),
        features: (0_i32..)
            .zip(copy.features.iter().zip(FEATURE_ICONS))
            .map(|(order, ((title, description), icon))| Feature {
                id: Some(i64::from(order + 1).into()),
                title: (*title).to_owned(),
                description: (*description).to_owned(),
                icon: Some(icon.to_owned()),
                order: Some(order),
            })
            .collect(),
        previous_works: (1_i64..)
            .zip(copy.works.iter().zip(WORK_IMAGES))
            .map(|(id, ((name, description), image))| PreviousWork {
                id: Some(id.into()),
                name: (*name).to_owned(),
                description: (*description).to_owned(),
                image_url: Some(image.to_owned()),
            })
            .collect(),
        testimonials: Vec::new(),
        footer_links: copy
            .footer
            .iter()
            .map(|label| FooterLink {
                label: (*label).to_owned(),
                href: "#".to_owned(),
            })
            .collect(),
        social_links: SocialLinks {
            twitter: Some("#".to_owned()),
            linkedin: Some("#".to_owned()),
            github: Some("#".to_owned()),
        },
    }
}

fn english() -> SiteContent {
    build(&LocaleCopy {
        settings: [
            "That El-himma",
            "Tech that turns ambition into results.",
            "Towards accelerated business growth through technological development and innovative software solutions, we provide an integrated commercial agency that supports your business from idea to execution and opens new opportunities in the market.",
            "Start Free",
            "Ready to streamline your growth?",
            "Join teams shipping faster with predictable, compounding outcomes.",
            "Get Started",
            "Contact Us",
            "We\u{2019}d love to learn about your goals. Tell us how we can help.",
            "Customer Feedback",
            "Unfiltered feedback from users who ship faster with That El-himma.",
        ],
        nav: [
            ("Home", "#home"),
            ("Features", "#features"),
            ("Testimonials", "#testimonials"),
            ("Feedback", "#feedback"),
            ("Contact", "#contact"),
        ],
        features: [
            (
                "Commercial Agency Services",
                "Expand your business reach with trusted partnerships and market entry support.",
            ),
            (
                "Technology Development",
                "Custom platforms and applications built to accelerate your digital growth.",
            ),
            (
                "Software Solutions",
                "Tailored software that simplifies operations and delivers measurable results.",
            ),
            (
                "Digital Transformation",
                "End-to-end strategies that integrate innovation into your core business.",
            ),
            (
                "Consulting & Strategy",
                "Expert guidance from idea validation to market execution.",
            ),
            (
                "Support & Scalability",
                "Ongoing support and scalable solutions to grow with your business needs.",
            ),
        ],
        works: [
            ("Project Alpha", "Web app for team task management."),
            ("Project Beta", "Integrated e-payment system for small businesses."),
            ("Project Gamma", "Mobile app for real-time data tracking."),
            ("Project Delta", "Dashboard for analytics and insights."),
        ],
        footer: ["Privacy", "Terms", "Security"],
    })
}

fn arabic() -> SiteContent {
    build(&LocaleCopy {
        settings: [
            "ذات الهمة",
            "تقنية تترجم الطموح لنتائج",
            "نحو نمو تجاري متسارع عبر تطوير تكنولوجي وحلول برمجية مبتكرة، نوفر لك وكالة تجارية متكاملة تدعم أعمالك من الفكرة حتى التنفيذ وتفتح لك آفاقاً جديدة في السوق.",
            "ابدأ مجانًا",
            "جاهز لتبسيط نموك؟",
            "انضم إلى فرقٍ تشحن أسرع بنتائج متوقعة ومتراكمة.",
            "ابدأ الآن",
            "تواصل معنا",
            "يسعدنا التعرف على أهدافك. أخبرنا كيف يمكننا المساعدة.",
            "ملاحظات العملاء",
            "آراء مباشرة من مستخدمين يحققون نتائج أسرع مع ذات الهمة.",
        ],
        nav: [
            ("الرئيسية", "#home"),
            ("الميزات", "#features"),
            ("اعمالنا", "#previous-work"),
            ("الملاحظات", "#feedback"),
            ("تواصل", "#contact"),
        ],
        features: [
            (
                "خدمات الوكالات التجارية",
                "توسيع نطاق عملك عبر شراكات موثوقة ودعم دخول الأسواق الجديدة.",
            ),
            (
                "التطوير التكنولوجي",
                "منصات وتطبيقات مخصّصة تُبنى لتسريع نموك الرقمي.",
            ),
            (
                "الحلول البرمجية",
                "برمجيات مُصممة خصيصًا لتبسيط عملياتك وتحقيق نتائج ملموسة.",
            ),
            (
                "التحول الرقمي",
                "استراتيجيات متكاملة تُدخل الابتكار في جوهر عملك.",
            ),
            (
                "الاستشارات والاستراتيجيات",
                "إرشاد متخصص من مرحلة الفكرة حتى التنفيذ في السوق.",
            ),
            (
                "الدعم وقابلية التوسع",
                "حلول قابلة للتوسع ودعم مستمر لينمو عملك بثبات.",
            ),
        ],
        works: [
            ("مشروع ألف", "تطبيق ويب لإدارة المهام للفرق."),
            ("مشروع باء", "نظام دفع إلكتروني متكامل للشركات الصغيرة."),
            ("مشروع جيم", "تطبيق جوال لتتبع البيانات في الوقت الفعلي."),
            ("مشروع دلتا", "لوحة تحكم للتحليلات والرؤى."),
        ],
        footer: ["الخصوصية", "الشروط", "الأمان"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::KNOWN_ICONS;

    #[test]
    fn test_both_locales_are_complete() {
        for locale in Locale::ALL {
            let content = demo_content(locale);
            assert!(!content.site_settings.company_name.is_empty());
            assert_eq!(content.nav_links.len(), 5);
            assert_eq!(content.features.len(), 6);
            assert_eq!(content.previous_works.len(), 4);
            assert_eq!(content.footer_links.len(), 3);
        }
    }

    #[test]
    fn test_locales_differ() {
        let en = demo_content(Locale::En);
        let ar = demo_content(Locale::Ar);
        assert_eq!(en.site_settings.company_name, "That El-himma");
        assert_eq!(ar.site_settings.company_name, "ذات الهمة");
        assert_eq!(
            en.site_settings.brand_primary_light,
            ar.site_settings.brand_primary_light
        );
    }

    #[test]
    fn test_demo_is_already_normalized() {
        let content = demo_content(Locale::Ar);
        assert_eq!(content.clone().normalized(), content);
        assert!(
            content
                .features
                .iter()
                .filter_map(|f| f.icon.as_deref())
                .all(|icon| KNOWN_ICONS.contains(&icon))
        );
    }
}
