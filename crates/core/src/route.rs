//! Navigation table.
//!
//! Kept free of any browser types so the routing rules can be unit-tested on
//! the host.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    CreateCampaign,
    ListCampaigns,
    /// Raw id segment; validated by the detail view so bad ids still render
    /// a message instead of redirecting.
    CampaignDetails(String),
}

impl Route {
    /// Resolve a path. The root and unknown paths redirect to the default.
    pub fn parse(path: &str) -> Self {
        let path = path.trim().trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["campaign", "create"] => Route::CreateCampaign,
            ["campaigns"] => Route::ListCampaigns,
            ["campaigns", id, "details"] => Route::CampaignDetails((*id).to_string()),
            _ => Route::default(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::CreateCampaign => "/campaign/create".to_string(),
            Route::ListCampaigns => "/campaigns".to_string(),
            Route::CampaignDetails(id) => format!("/campaigns/{id}/details"),
        }
    }

    /// Location hash used by the browser app (`#/campaigns`).
    pub fn hash(&self) -> String {
        format!("#{}", self.path())
    }
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLink {
    ShowAll,
    CreateNew,
}

impl MenuLink {
    pub fn label(self) -> &'static str {
        match self {
            MenuLink::ShowAll => "Show all campaigns",
            MenuLink::CreateNew => "Create new campaign",
        }
    }

    pub fn route(self) -> Route {
        match self {
            MenuLink::ShowAll => Route::ListCampaigns,
            MenuLink::CreateNew => Route::CreateCampaign,
        }
    }

    pub fn all() -> &'static [MenuLink] {
        &[MenuLink::ShowAll, MenuLink::CreateNew]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Route::parse("/campaign/create"), Route::CreateCampaign);
        assert_eq!(Route::parse("/campaigns"), Route::ListCampaigns);
        assert_eq!(Route::parse("/campaigns/"), Route::ListCampaigns);
        assert_eq!(
            Route::parse("/campaigns/3/details"),
            Route::CampaignDetails("3".into())
        );
        assert_eq!(
            Route::parse("#/campaigns/abc/details?x=1"),
            Route::CampaignDetails("abc".into())
        );
    }

    #[test]
    fn root_and_unknown_redirect_to_create() {
        assert_eq!(Route::parse(""), Route::CreateCampaign);
        assert_eq!(Route::parse("/"), Route::CreateCampaign);
        assert_eq!(Route::parse("/nope"), Route::CreateCampaign);
        assert_eq!(Route::parse("/campaigns/3"), Route::CreateCampaign);
    }

    #[test]
    fn paths_round_trip() {
        for r in [
            Route::CreateCampaign,
            Route::ListCampaigns,
            Route::CampaignDetails("42".into()),
        ] {
            assert_eq!(Route::parse(&r.path()), r);
            assert_eq!(Route::parse(&r.hash()), r);
        }
    }

    #[test]
    fn menu_inventory_is_stable() {
        let all = MenuLink::all();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|m| m.route() == Route::ListCampaigns));
        for m in all {
            assert!(!m.label().trim().is_empty());
        }
    }
}
