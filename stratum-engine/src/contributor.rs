//! A single node in the configuration contributor tree.
//!
//! Contributors are immutable; every processing step builds a new node
//! with updated children rather than mutating in place, which keeps
//! resolution order deterministic and replayable.

use stratum_core::{ConfigError, PropertySource};

use crate::activation::{ActivationContext, ImportPhase};
use crate::location::ConfigLocation;
use crate::properties::{
    DocumentDirectives, ACTIVE_PROFILES_PROPERTY, DEFAULT_PROFILES_PROPERTY,
};
use crate::resource::ConfigResource;

/// The kinds of contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributorKind {
    /// The synthetic root holding the initial set of children.
    Root,
    /// An initial import that only triggers further resolution.
    InitialImport,
    /// A pre-existing property source wrapped from the environment.
    Existing,
    /// A document imported from another contributor.
    Imported,
}

/// Per-phase child lists. `None` means the phase has not been
/// processed yet; a recorded empty list counts as processed.
#[derive(Debug, Clone, Default)]
struct Children {
    before: Option<Vec<Contributor>>,
    after: Option<Vec<Contributor>>,
}

impl Children {
    fn get(&self, phase: ImportPhase) -> &[Contributor] {
        self.slot(phase).as_deref().unwrap_or(&[])
    }

    fn recorded(&self, phase: ImportPhase) -> bool {
        self.slot(phase).is_some()
    }

    fn slot(&self, phase: ImportPhase) -> &Option<Vec<Contributor>> {
        match phase {
            ImportPhase::BeforeProfileActivation => &self.before,
            ImportPhase::AfterProfileActivation => &self.after,
        }
    }

    fn slot_mut(&mut self, phase: ImportPhase) -> &mut Option<Vec<Contributor>> {
        match phase {
            ImportPhase::BeforeProfileActivation => &mut self.before,
            ImportPhase::AfterProfileActivation => &mut self.after,
        }
    }
}

/// Path from the root to a nested contributor.
pub(crate) type Step = (ImportPhase, usize);

/// A node that directly or indirectly contributes configuration data.
#[derive(Debug, Clone)]
pub struct Contributor {
    kind: ContributorKind,
    location: Option<ConfigLocation>,
    resource: Option<ConfigResource>,
    property_source: Option<PropertySource>,
    directives: Option<DocumentDirectives>,
    children: Children,
}

impl Contributor {
    /// Create the root contributor over the initial children.
    pub fn root(children: Vec<Contributor>) -> Self {
        Self {
            kind: ContributorKind::Root,
            location: None,
            resource: None,
            property_source: None,
            directives: None,
            children: Children {
                before: Some(children),
                after: None,
            },
        }
    }

    /// Create an initial-import contributor. It contributes no
    /// properties itself, it only requests resolution of a location.
    pub fn initial_import(location: ConfigLocation) -> Self {
        Self {
            kind: ContributorKind::InitialImport,
            location: None,
            resource: None,
            property_source: None,
            directives: Some(DocumentDirectives::of_imports(vec![location])),
            children: Children::default(),
        }
    }

    /// Wrap an existing environment property source. Contributes its
    /// properties but never imports anything.
    pub fn existing(property_source: PropertySource) -> Self {
        Self {
            kind: ContributorKind::Existing,
            location: None,
            resource: None,
            property_source: Some(property_source),
            directives: None,
            children: Children::default(),
        }
    }

    /// Create an imported contributor from a loaded document.
    ///
    /// Profile declarations inside a profile-specific document are
    /// rejected here, at creation time, so the error points at the
    /// offending source.
    pub fn imported(
        location: ConfigLocation,
        resource: ConfigResource,
        property_source: PropertySource,
    ) -> Result<Self, ConfigError> {
        if resource.profile().is_some() {
            for key in [ACTIVE_PROFILES_PROPERTY, DEFAULT_PROFILES_PROPERTY] {
                // Lists flatten to indexed keys, so check both forms.
                if property_source.contains(key) || property_source.contains(&format!("{key}[0]"))
                {
                    return Err(ConfigError::InvalidProfileProperty {
                        key: key.to_string(),
                        source_name: property_source.name().to_string(),
                    });
                }
            }
        }
        let directives = DocumentDirectives::from_source(&property_source);
        Ok(Self {
            kind: ContributorKind::Imported,
            location: Some(location),
            resource: Some(resource),
            property_source: Some(property_source),
            directives: Some(directives),
            children: Children::default(),
        })
    }

    pub fn kind(&self) -> ContributorKind {
        self.kind
    }

    pub fn location(&self) -> Option<&ConfigLocation> {
        self.location.as_ref()
    }

    pub fn resource(&self) -> Option<&ConfigResource> {
        self.resource.as_ref()
    }

    pub fn property_source(&self) -> Option<&PropertySource> {
        self.property_source.as_ref()
    }

    pub fn directives(&self) -> Option<&DocumentDirectives> {
        self.directives.as_ref()
    }

    /// Whether this contributor applies under the given context.
    pub fn is_active(&self, context: Option<&ActivationContext>) -> bool {
        self.directives
            .as_ref()
            .map_or(true, |directives| directives.is_active(context))
    }

    /// Imports requested by this contributor.
    pub fn imports(&self) -> &[ConfigLocation] {
        self.directives
            .as_ref()
            .map_or(&[], DocumentDirectives::imports)
    }

    /// True when this contributor has imports that have not yet been
    /// resolved in the given phase.
    pub fn has_unprocessed_imports(&self, phase: ImportPhase) -> bool {
        !self.imports().is_empty() && !self.children.recorded(phase)
    }

    pub fn children(&self, phase: ImportPhase) -> &[Contributor] {
        self.children.get(phase)
    }

    /// A copy of this contributor with children recorded for a phase.
    pub fn with_children(&self, phase: ImportPhase, children: Vec<Contributor>) -> Self {
        let mut updated = self.clone();
        *updated.children.slot_mut(phase) = Some(children);
        updated
    }

    /// A copy of the tree where the node at `path` has `children`
    /// recorded for `phase`. Paths outside the tree leave it unchanged.
    pub(crate) fn with_children_recorded(
        &self,
        path: &[Step],
        phase: ImportPhase,
        children: Vec<Contributor>,
    ) -> Self {
        let Some(((child_phase, index), rest)) = path.split_first() else {
            return self.with_children(phase, children);
        };
        let mut updated = self.clone();
        if let Some(existing) = updated.children.slot_mut(*child_phase) {
            if let Some(child) = existing.get_mut(*index) {
                *child = child.with_children_recorded(rest, phase, children);
            }
        }
        updated
    }

    /// Traverse this contributor and all children in priority order:
    /// after-phase children first, then before-phase children, then
    /// the node itself.
    pub fn iter(&self) -> impl Iterator<Item = &Contributor> {
        let mut out = Vec::new();
        self.visit(&mut out);
        out.into_iter()
    }

    fn visit<'a>(&'a self, out: &mut Vec<&'a Contributor>) {
        for child in self.children(ImportPhase::AfterProfileActivation) {
            child.visit(out);
        }
        for child in self.children(ImportPhase::BeforeProfileActivation) {
            child.visit(out);
        }
        out.push(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn imported(name: &str) -> Contributor {
        let mut source = PropertySource::new(name);
        source.insert("marker", name);
        Contributor::imported(
            ConfigLocation::of(name),
            ConfigResource::new(PathBuf::from(name)),
            source,
        )
        .unwrap()
    }

    fn names(contributor: &Contributor) -> Vec<String> {
        contributor
            .iter()
            .map(|c| {
                c.property_source()
                    .map(|s| s.name().to_string())
                    .unwrap_or_else(|| format!("{:?}", c.kind()))
            })
            .collect()
    }

    #[test]
    fn initial_import_has_unprocessed_imports() {
        let contributor = Contributor::initial_import(ConfigLocation::of("./config/"));
        assert!(contributor.has_unprocessed_imports(ImportPhase::BeforeProfileActivation));
        assert!(contributor.has_unprocessed_imports(ImportPhase::AfterProfileActivation));
        assert!(contributor.is_active(None));
    }

    #[test]
    fn recorded_empty_children_count_as_processed() {
        let contributor = Contributor::initial_import(ConfigLocation::of("./config/"));
        let processed =
            contributor.with_children(ImportPhase::BeforeProfileActivation, Vec::new());
        assert!(!processed.has_unprocessed_imports(ImportPhase::BeforeProfileActivation));
        assert!(processed.has_unprocessed_imports(ImportPhase::AfterProfileActivation));
    }

    #[test]
    fn existing_contributor_never_imports() {
        let contributor = Contributor::existing(PropertySource::new("env"));
        assert!(contributor.imports().is_empty());
        assert!(!contributor.has_unprocessed_imports(ImportPhase::BeforeProfileActivation));
    }

    #[test]
    fn iteration_visits_after_children_before_before_children() {
        let base = imported("base").with_children(
            ImportPhase::AfterProfileActivation,
            vec![imported("profile-specific")],
        );
        let root = Contributor::root(vec![base]);
        assert_eq!(names(&root), vec!["profile-specific", "base", "Root"]);
    }

    #[test]
    fn iteration_is_depth_first_in_child_order() {
        let first = imported("first").with_children(
            ImportPhase::BeforeProfileActivation,
            vec![imported("first-child")],
        );
        let second = imported("second");
        let root = Contributor::root(vec![first, second]);
        assert_eq!(
            names(&root),
            vec!["first-child", "first", "second", "Root"]
        );
    }

    #[test]
    fn with_children_recorded_updates_a_nested_node() {
        let root = Contributor::root(vec![imported("a"), imported("b")]);
        let path: Vec<Step> = vec![(ImportPhase::BeforeProfileActivation, 1)];
        let updated = root.with_children_recorded(
            &path,
            ImportPhase::BeforeProfileActivation,
            vec![imported("b-child")],
        );
        assert_eq!(names(&updated), vec!["a", "b-child", "b", "Root"]);
        // original tree untouched
        assert_eq!(names(&root), vec!["a", "b", "Root"]);
    }

    #[test]
    fn profile_declarations_rejected_in_profile_specific_sources() {
        let mut source = PropertySource::new("app-dev");
        source.insert(ACTIVE_PROFILES_PROPERTY, "other");
        let err = Contributor::imported(
            ConfigLocation::of("app-dev.toml"),
            ConfigResource::with_profile(PathBuf::from("app-dev.toml"), "dev"),
            source,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProfileProperty { .. }));
    }

    #[test]
    fn list_form_profile_declarations_are_rejected_too() {
        let mut source = PropertySource::new("app-dev");
        source.insert(format!("{ACTIVE_PROFILES_PROPERTY}[0]"), "prod");
        let err = Contributor::imported(
            ConfigLocation::of("app-dev.toml"),
            ConfigResource::with_profile(PathBuf::from("app-dev.toml"), "dev"),
            source,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProfileProperty { .. }));
    }
}
