/// Profile registry: the immutable list of conversational profiles.
use switchyard_core::{Profile, SwitchyardError};
use tracing::info;

/// Holds every profile and knows which one is the default.
///
/// Built once at startup; there is no way to mutate it afterwards.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<Profile>,
    default_index: usize,
}

impl ProfileRegistry {
    /// Validate and freeze `profiles`.
    ///
    /// Fails on an empty list, a duplicate name, or anything other than exactly
    /// one profile flagged as default.
    pub fn register(profiles: Vec<Profile>) -> Result<Self, SwitchyardError> {
        if profiles.is_empty() {
            return Err(SwitchyardError::config("no profiles registered"));
        }

        for (i, profile) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(SwitchyardError::config(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        let defaults: Vec<usize> = profiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_default)
            .map(|(i, _)| i)
            .collect();
        let default_index = match defaults[..] {
            [index] => index,
            [] => return Err(SwitchyardError::config("no default profile")),
            _ => {
                return Err(SwitchyardError::config(format!(
                    "{} profiles marked as default",
                    defaults.len()
                )));
            }
        };

        info!(
            count = profiles.len(),
            default = %profiles[default_index].name,
            "[Profiles] Registry ready"
        );
        Ok(Self { profiles, default_index })
    }

    /// Look up a profile by name.
    pub fn resolve(&self, name: &str) -> Result<&Profile, SwitchyardError> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| SwitchyardError::not_found("profile", name))
    }

    /// Look up the session's chosen profile. `None` means nothing was chosen yet.
    pub fn resolve_selected(&self, selected: Option<&str>) -> Result<&Profile, SwitchyardError> {
        match selected {
            Some(name) => self.resolve(name),
            None => Err(SwitchyardError::not_found("profile", "<none selected>")),
        }
    }

    pub fn default_profile(&self) -> &Profile {
        &self.profiles[self.default_index]
    }

    /// Profiles in publication order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> Profile {
        Profile::new(name, "", "")
    }

    #[test]
    fn exactly_one_default_required() {
        assert!(ProfileRegistry::register(vec![p("a"), p("b")]).is_err());
        assert!(ProfileRegistry::register(vec![p("a").default_profile(), p("b").default_profile()]).is_err());
        let reg = ProfileRegistry::register(vec![p("a"), p("b").default_profile()]).unwrap();
        assert_eq!(reg.default_profile().name, "b");
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = ProfileRegistry::register(vec![p("a").default_profile(), p("a")]).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn empty_list_rejected() {
        assert!(ProfileRegistry::register(vec![]).is_err());
    }

    #[test]
    fn unresolved_selection_is_not_found() {
        let reg = ProfileRegistry::register(vec![p("a").default_profile()]).unwrap();
        assert!(matches!(
            reg.resolve_selected(None),
            Err(SwitchyardError::NotFound { kind: "profile", .. })
        ));
        assert!(reg.resolve("zzz").is_err());
        assert_eq!(reg.resolve_selected(Some("a")).unwrap().name, "a");
    }

    #[test]
    fn publication_order_is_registration_order() {
        let reg = ProfileRegistry::register(vec![p("x"), p("y").default_profile(), p("z")]).unwrap();
        let names: Vec<_> = reg.profiles().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }
}
