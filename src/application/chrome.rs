use crate::config::SiteSettings;
use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};

const NAVIGATION: [(&str, &str); 4] = [
    ("Home", "/"),
    ("About", "/about"),
    ("Sample Post", "/post"),
    ("Contact", "/contact"),
];

/// Site chrome shared by every rendered page.
#[derive(Clone)]
pub struct ChromeService {
    chrome: LayoutChrome,
}

impl ChromeService {
    pub fn new(site: &SiteSettings) -> Self {
        let entries = NAVIGATION
            .iter()
            .map(|(label, href)| NavigationLinkView {
                label: (*label).to_string(),
                href: (*href).to_string(),
                is_active: false,
            })
            .collect();

        let chrome = LayoutChrome {
            brand: BrandView {
                title: site.title.clone(),
                href: "/".to_string(),
            },
            navigation: NavigationView { entries },
            footer: FooterView {
                copy: site.footer.clone(),
            },
            meta: PageMetaView {
                site_title: site.title.clone(),
                title: site.title.clone(),
                description: site.description.clone(),
            },
        };

        Self { chrome }
    }

    /// Chrome for the page served at `path`.
    pub fn load(&self, path: &str) -> LayoutChrome {
        self.chrome.clone().with_active(path)
    }
}
