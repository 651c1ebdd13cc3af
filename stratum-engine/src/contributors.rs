//! The immutable contributor tree and its processing loop.

use stratum_core::{ConfigError, ConfigValue};
use tracing::trace;

use crate::activation::{ActivationContext, ImportPhase};
use crate::contributor::{Contributor, Step};
use crate::importer::Importer;
use crate::location::ConfigLocation;

/// What to do when a property lookup hits an inactive source first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnInactive {
    /// Skip the inactive source and keep scanning.
    Skip,
    /// Fail the lookup; used for properties that steer resolution.
    Fail,
}

/// An immutable tree of contributors. Processing never mutates the
/// tree; it returns a new instance with one node replaced per step.
#[derive(Debug, Clone)]
pub struct Contributors {
    root: Contributor,
}

impl Contributors {
    pub fn new(contributors: Vec<Contributor>) -> Self {
        Self {
            root: Contributor::root(contributors),
        }
    }

    pub fn root(&self) -> &Contributor {
        &self.root
    }

    /// All contributors in priority order, highest precedence first.
    pub fn iter(&self) -> impl Iterator<Item = &Contributor> {
        self.root.iter()
    }

    /// Process imports from all active contributors for the phase
    /// implied by `context`, returning the fully-drained tree.
    ///
    /// One contributor is processed per step: the first node in
    /// priority order that is active and still has unresolved imports
    /// for the phase. Its imports are resolved and loaded, the results
    /// attached as children, and the scan restarts. Because loaded
    /// resources are deduplicated by the importer and processed nodes
    /// record their children (even when empty), the loop terminates
    /// and re-running it on a drained tree is a no-op.
    pub fn with_processed_imports(
        &self,
        importer: &mut Importer,
        context: Option<&ActivationContext>,
    ) -> Result<Self, ConfigError> {
        let phase = ImportPhase::for_context(context);
        trace!(%phase, "processing imports");
        let mut result = self.clone();
        let mut processed = 0usize;
        loop {
            let Some((path, imports)) = find_unprocessed(&result.root, context, phase) else {
                trace!(processed, %phase, "processed imports");
                return Ok(result);
            };
            trace!(?imports, "resolving imports");
            let profiles = context.and_then(ActivationContext::profiles);
            let imported = importer.resolve_and_load(&imports, profiles)?;
            trace!(count = imported.len(), "imported config data");

            // Later-resolved documents win, so attach everything in
            // reverse: last location first, last document of a
            // multi-document load first.
            let mut children = Vec::new();
            for (location, resource, sources) in imported.iter().rev() {
                for source in sources.iter().rev() {
                    children.push(Contributor::imported(
                        location.clone(),
                        resource.clone(),
                        source.clone(),
                    )?);
                }
            }
            let root = result.root.with_children_recorded(&path, phase, children);
            result = Contributors { root };
            processed += 1;
        }
    }

    /// Look up a property across active contributors in priority
    /// order. The first source defining the key wins; hitting an
    /// inactive source first behaves per `on_inactive`.
    pub fn value<'a>(
        &'a self,
        key: &str,
        context: Option<&ActivationContext>,
        on_inactive: OnInactive,
    ) -> Result<Option<&'a ConfigValue>, ConfigError> {
        for contributor in self.iter() {
            let Some(source) = contributor.property_source() else {
                continue;
            };
            if let Some(value) = source.get(key) {
                if !contributor.is_active(context) {
                    match on_inactive {
                        OnInactive::Fail => {
                            return Err(ConfigError::InactivePropertyUse {
                                key: key.to_string(),
                                source_name: source.name().to_string(),
                            })
                        }
                        OnInactive::Skip => continue,
                    }
                }
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Look up a list-valued property (comma-separated or indexed).
    pub fn string_list(
        &self,
        key: &str,
        context: Option<&ActivationContext>,
        on_inactive: OnInactive,
    ) -> Result<Vec<String>, ConfigError> {
        let indexed = format!("{key}[0]");
        for contributor in self.iter() {
            let Some(source) = contributor.property_source() else {
                continue;
            };
            if source.contains(key) || source.contains(&indexed) {
                if !contributor.is_active(context) {
                    match on_inactive {
                        OnInactive::Fail => {
                            return Err(ConfigError::InactivePropertyUse {
                                key: key.to_string(),
                                source_name: source.name().to_string(),
                            })
                        }
                        OnInactive::Skip => continue,
                    }
                }
                return Ok(stratum_core::read_string_list(|k| source.get(k), key));
            }
        }
        Ok(Vec::new())
    }
}

/// Find the first contributor in priority order that is active and
/// has unprocessed imports for the phase, returning its path and the
/// imports it requests.
fn find_unprocessed(
    root: &Contributor,
    context: Option<&ActivationContext>,
    phase: ImportPhase,
) -> Option<(Vec<Step>, Vec<ConfigLocation>)> {
    let mut path = Vec::new();
    find_in(root, context, phase, &mut path).map(|imports| (path, imports))
}

fn find_in(
    node: &Contributor,
    context: Option<&ActivationContext>,
    phase: ImportPhase,
    path: &mut Vec<Step>,
) -> Option<Vec<ConfigLocation>> {
    for child_phase in [
        ImportPhase::AfterProfileActivation,
        ImportPhase::BeforeProfileActivation,
    ] {
        for (index, child) in node.children(child_phase).iter().enumerate() {
            path.push((child_phase, index));
            if let Some(found) = find_in(child, context, phase, path) {
                return Some(found);
            }
            path.pop();
        }
    }
    if node.is_active(context) && node.has_unprocessed_imports(phase) {
        return Some(node.imports().to_vec());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ConfigResource;
    use std::path::PathBuf;
    use stratum_core::PropertySource;

    fn imported_with(name: &str, entries: &[(&str, &str)]) -> Contributor {
        let mut source = PropertySource::new(name);
        for (key, value) in entries {
            source.insert(*key, *value);
        }
        Contributor::imported(
            ConfigLocation::of(name),
            ConfigResource::new(PathBuf::from(name)),
            source,
        )
        .unwrap()
    }

    #[test]
    fn value_takes_the_highest_priority_source() {
        let contributors = Contributors::new(vec![
            imported_with("high", &[("key", "high-value")]),
            imported_with("low", &[("key", "low-value")]),
        ]);
        let value = contributors.value("key", None, OnInactive::Skip).unwrap();
        assert_eq!(value, Some(&ConfigValue::String("high-value".into())));
    }

    #[test]
    fn value_fails_on_inactive_source_when_asked() {
        let contributors = Contributors::new(vec![imported_with(
            "inactive",
            &[
                ("key", "hidden"),
                (crate::properties::ON_PROFILE_PROPERTY, "never"),
            ],
        )]);
        let err = contributors
            .value("key", None, OnInactive::Fail)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InactivePropertyUse { .. }));
        // Skip keeps scanning past the inactive source.
        let value = contributors.value("key", None, OnInactive::Skip).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn string_list_reads_from_one_source_only() {
        let contributors = Contributors::new(vec![
            imported_with("high", &[("list", "a, b")]),
            imported_with("low", &[("list", "c")]),
        ]);
        let list = contributors
            .string_list("list", None, OnInactive::Skip)
            .unwrap();
        assert_eq!(list, vec!["a", "b"]);
    }
}
