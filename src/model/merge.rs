//! Structural merge of configuration models.
//!
//! Merging is dominance-based: on a key collision the dominant side wins
//! outright. This differs from the first-wins rule the effective profile
//! applies to its logger table; both rules are load-bearing.

use super::{Model, ProfileNode};

/// Merge `source` into `target`.
///
/// When `source_dominant` is true, entries from `source` replace colliding
/// entries in `target`; otherwise existing `target` entries are kept.
/// Non-colliding entries from both sides are always retained, with new
/// source-side profiles appended after the existing ones in their original
/// order.
pub fn merge(target: &mut Model, source: Model, source_dominant: bool) {
    merge_properties(target, &source, source_dominant);
    merge_profiles(target, source.profiles, source_dominant);
}

fn merge_properties(target: &mut Model, source: &Model, source_dominant: bool) {
    for (key, value) in &source.properties {
        if source_dominant || !target.properties.contains_key(key) {
            target.properties.insert(key.clone(), value.clone());
        }
    }
}

fn merge_profiles(target: &mut Model, source: Vec<ProfileNode>, source_dominant: bool) {
    for profile in source {
        match target.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => {
                if source_dominant {
                    *existing = profile;
                }
            }
            None => target.profiles.push(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LoggerNode;

    fn model_with_property(key: &str, value: &str) -> Model {
        let mut model = Model::new();
        model.properties.insert(key.to_string(), value.to_string());
        model
    }

    #[test]
    fn test_properties_source_dominant() {
        let mut target = model_with_property("color", "red");
        let mut source = model_with_property("color", "blue");
        source.properties.insert("extra".into(), "1".into());

        merge(&mut target, source, true);

        assert_eq!(target.properties["color"], "blue");
        assert_eq!(target.properties["extra"], "1");
    }

    #[test]
    fn test_properties_target_dominant() {
        let mut target = model_with_property("color", "red");
        let mut source = model_with_property("color", "blue");
        source.properties.insert("extra".into(), "1".into());

        merge(&mut target, source, false);

        assert_eq!(target.properties["color"], "red");
        assert_eq!(target.properties["extra"], "1");
    }

    #[test]
    fn test_profiles_replace_on_collision_when_dominant() {
        let mut target = Model::new();
        let mut existing = ProfileNode::named("default");
        existing.loggers.push(LoggerNode::new("a", "WARN"));
        target.profiles.push(existing);
        target.profiles.push(ProfileNode::named("quiet"));

        let mut source = Model::new();
        let mut replacement = ProfileNode::named("default");
        replacement.loggers.push(LoggerNode::new("a", "DEBUG"));
        source.profiles.push(replacement);
        source.profiles.push(ProfileNode::named("verbose"));

        merge(&mut target, source, true);

        // Insertion order preserved: existing first, new source profiles appended.
        let names: Vec<_> = target.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["default", "quiet", "verbose"]);
        assert_eq!(target.profiles[0].loggers[0].level, "DEBUG");
    }

    #[test]
    fn test_profiles_keep_on_collision_when_not_dominant() {
        let mut target = Model::new();
        let mut existing = ProfileNode::named("default");
        existing.loggers.push(LoggerNode::new("a", "WARN"));
        target.profiles.push(existing);

        let mut source = Model::new();
        let mut replacement = ProfileNode::named("default");
        replacement.loggers.push(LoggerNode::new("a", "DEBUG"));
        source.profiles.push(replacement);

        merge(&mut target, source, false);

        assert_eq!(target.profiles.len(), 1);
        assert_eq!(target.profiles[0].loggers[0].level, "WARN");
    }
}
