//! Reshape an aggregated property map into the three lists the inspector
//! panel renders: every property, token-backed ones, variable-backed ones.

use crate::model::PropertyFact;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A property fact tagged with its property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedProperty {
    pub property: String,
    #[serde(flatten)]
    pub fact: PropertyFact,
}

/// Property facts grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedProperties {
    pub tokens: Vec<GroupedProperty>,
    /// Every property, token- or variable-backed or not.
    pub computed: Vec<GroupedProperty>,
    pub variables: Vec<GroupedProperty>,
}

/// Group `properties` by kind. Property order is preserved in each list.
pub fn group_by_kind(properties: &BTreeMap<String, PropertyFact>) -> GroupedProperties {
    let mut groups = GroupedProperties::default();
    for (property, fact) in properties {
        let item = GroupedProperty {
            property: property.clone(),
            fact: fact.clone(),
        };
        if fact.token.as_ref().is_some_and(|t| !t.is_empty()) {
            groups.tokens.push(item.clone());
        }
        if fact.variable.as_ref().is_some_and(|v| !v.is_empty()) {
            groups.variables.push(item.clone());
        }
        groups.computed.push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::{SmallVec, smallvec};

    fn fact(token: Option<&str>, variable: Option<&str>) -> PropertyFact {
        PropertyFact {
            value: Some("x".into()),
            token: token.map(|t| smallvec![t.to_string()]),
            variable: variable.map(|v| smallvec![v.to_string()]),
            ..PropertyFact::default()
        }
    }

    #[test]
    fn computed_has_every_property() {
        let mut props = BTreeMap::new();
        props.insert("color".to_string(), fact(Some("COLOR_PRIMARY"), Some("--nk-color-primary")));
        props.insert("margin".to_string(), fact(None, Some("--space")));
        props.insert("width".to_string(), fact(None, None));

        let groups = group_by_kind(&props);
        let names = |items: &[GroupedProperty]| {
            items.iter().map(|i| i.property.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&groups.computed), vec!["color", "margin", "width"]);
        assert_eq!(names(&groups.tokens), vec!["color"]);
        assert_eq!(names(&groups.variables), vec!["color", "margin"]);
    }

    #[test]
    fn empty_lists_do_not_count() {
        let mut props = BTreeMap::new();
        props.insert(
            "color".to_string(),
            PropertyFact {
                token: Some(SmallVec::new()),
                variable: Some(SmallVec::new()),
                ..PropertyFact::default()
            },
        );
        let groups = group_by_kind(&props);
        assert!(groups.tokens.is_empty());
        assert!(groups.variables.is_empty());
        assert_eq!(groups.computed.len(), 1);
    }

    #[test]
    fn items_flatten_to_json() {
        let mut props = BTreeMap::new();
        props.insert("width".to_string(), fact(None, None));
        let json = serde_json::to_value(group_by_kind(&props)).unwrap();
        assert_eq!(json["computed"][0], serde_json::json!({"property": "width", "value": "x"}));
    }
}
