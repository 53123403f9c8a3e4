//! Declarative permission schema.
//!
//! The console's permission vocabulary is defined once, as static data, in
//! [`SCHEMA`]. Everything else (the all-denied default instance, the set of
//! valid leaf paths, dot-path parsing, and the fill/drop rules applied when a
//! persisted blob is loaded) is derived from it mechanically, so the schema
//! and the default object cannot drift apart.
//!
//! The shape is closed: roles never carry keys outside this schema, and a
//! leaf added here in a later release reads as `false` from older persisted
//! roles.

use crate::error::PermissionError;

/// One node of the schema: a boolean flag or a named sub-module.
#[derive(Debug, Clone, Copy)]
pub enum NodeSpec {
    /// A boolean grant, e.g. `view` or `ptz_control`.
    Leaf(&'static str),
    /// A module or sub-module containing further nodes. Never empty.
    Group {
        key: &'static str,
        children: &'static [NodeSpec],
    },
}

impl NodeSpec {
    /// The key this node is addressed by within its parent.
    pub const fn key(&self) -> &'static str {
        match self {
            NodeSpec::Leaf(key) => key,
            NodeSpec::Group { key, .. } => key,
        }
    }
}

/// Shorthand for the ubiquitous view/create/edit/delete flag set.
const CRUD: &[NodeSpec] = &[
    NodeSpec::Leaf("view"),
    NodeSpec::Leaf("create"),
    NodeSpec::Leaf("edit"),
    NodeSpec::Leaf("delete"),
];

/// The canonical permission tree shape.
///
/// Top-level keys are the seven console sections; nesting reaches four
/// levels under `parameters` (e.g. `parameters.camera_sources.cameras.edit`).
pub const SCHEMA: &[NodeSpec] = &[
    NodeSpec::Group {
        key: "home",
        children: &[NodeSpec::Leaf("view")],
    },
    NodeSpec::Group {
        key: "monitoring",
        children: &[
            NodeSpec::Leaf("view"),
            NodeSpec::Leaf("view_online"),
            NodeSpec::Leaf("view_archive"),
            NodeSpec::Leaf("ptz_control"),
        ],
    },
    NodeSpec::Group {
        key: "ord",
        children: &[
            NodeSpec::Leaf("view"),
            NodeSpec::Group {
                key: "online_search",
                children: CRUD,
            },
            NodeSpec::Group {
                key: "online_search_license_plate",
                children: CRUD,
            },
            NodeSpec::Group {
                key: "historical_search_faces",
                children: &[NodeSpec::Leaf("view")],
            },
            NodeSpec::Group {
                key: "historical_search_license_plates",
                children: &[NodeSpec::Leaf("view")],
            },
        ],
    },
    NodeSpec::Group {
        key: "layouts",
        children: &[
            NodeSpec::Leaf("view"),
            NodeSpec::Leaf("create"),
            NodeSpec::Leaf("edit"),
            NodeSpec::Leaf("delete"),
            NodeSpec::Leaf("camera_settings"),
        ],
    },
    NodeSpec::Group {
        key: "reports",
        children: &[NodeSpec::Leaf("view")],
    },
    NodeSpec::Group {
        key: "photo_archive",
        children: CRUD,
    },
    NodeSpec::Group {
        key: "parameters",
        children: &[
            NodeSpec::Leaf("view"),
            NodeSpec::Group {
                key: "access_management",
                children: &[
                    NodeSpec::Leaf("view"),
                    NodeSpec::Group {
                        key: "roles",
                        children: CRUD,
                    },
                    NodeSpec::Group {
                        key: "users",
                        children: CRUD,
                    },
                    NodeSpec::Group {
                        key: "user_groups",
                        children: CRUD,
                    },
                    NodeSpec::Group {
                        key: "sessions",
                        children: &[NodeSpec::Leaf("view")],
                    },
                    NodeSpec::Group {
                        key: "audit_log",
                        children: &[NodeSpec::Leaf("view")],
                    },
                ],
            },
            NodeSpec::Group {
                key: "camera_sources",
                children: &[
                    NodeSpec::Leaf("view"),
                    NodeSpec::Group {
                        key: "cameras",
                        children: CRUD,
                    },
                    NodeSpec::Group {
                        key: "camera_groups",
                        children: CRUD,
                    },
                    NodeSpec::Group {
                        key: "owners_registry",
                        children: CRUD,
                    },
                    NodeSpec::Group {
                        key: "tags",
                        children: CRUD,
                    },
                    NodeSpec::Group {
                        key: "camera_models",
                        children: CRUD,
                    },
                ],
            },
            NodeSpec::Group {
                key: "territorial_divisions",
                children: CRUD,
            },
            NodeSpec::Group {
                key: "trash",
                children: &[NodeSpec::Leaf("view")],
            },
            NodeSpec::Group {
                key: "vvs",
                children: &[NodeSpec::Leaf("view")],
            },
        ],
    },
];

/// Enumerates every valid leaf path in schema order.
///
/// Useful for exhaustive checks ("every flag of a fresh tree is `false`")
/// and for rendering the full tree in the console.
pub fn leaf_paths() -> Vec<Vec<&'static str>> {
    let mut paths = Vec::new();
    let mut prefix = Vec::new();
    collect_leaf_paths(SCHEMA, &mut prefix, &mut paths);
    paths
}

fn collect_leaf_paths(
    nodes: &'static [NodeSpec],
    prefix: &mut Vec<&'static str>,
    out: &mut Vec<Vec<&'static str>>,
) {
    for node in nodes {
        match node {
            NodeSpec::Leaf(key) => {
                let mut path = prefix.clone();
                path.push(key);
                out.push(path);
            }
            NodeSpec::Group { key, children } => {
                prefix.push(key);
                collect_leaf_paths(children, prefix, out);
                prefix.pop();
            }
        }
    }
}

/// Resolves a dotted path (`parameters.access_management.roles.delete`)
/// against the schema, returning the canonical key sequence.
///
/// This is the validation entry point for paths arriving from outside the
/// process (console arguments); paths that do not address a leaf are
/// rejected with the same taxonomy the tree engine uses.
pub fn parse_path(dotted: &str) -> Result<Vec<&'static str>, PermissionError> {
    let segments: Vec<&str> = dotted.split('.').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Err(PermissionError::EmptyPath);
    }

    let mut resolved = Vec::with_capacity(segments.len());
    let mut level = SCHEMA;

    for (i, segment) in segments.iter().enumerate() {
        let node = level.iter().find(|n| n.key() == *segment).ok_or_else(|| {
            PermissionError::UnknownSegment {
                path: dotted.to_string(),
                segment: segment.to_string(),
            }
        })?;
        resolved.push(node.key());

        match node {
            NodeSpec::Leaf(key) => {
                if i + 1 != segments.len() {
                    return Err(PermissionError::TraversesLeaf {
                        path: dotted.to_string(),
                        segment: key.to_string(),
                    });
                }
            }
            NodeSpec::Group { children, .. } => {
                if i + 1 == segments.len() {
                    return Err(PermissionError::EndsOnGroup {
                        path: dotted.to_string(),
                    });
                }
                level = children;
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_seven_top_level_modules() {
        let keys: Vec<&str> = SCHEMA.iter().map(|n| n.key()).collect();
        assert_eq!(
            keys,
            vec![
                "home",
                "monitoring",
                "ord",
                "layouts",
                "reports",
                "photo_archive",
                "parameters"
            ]
        );
    }

    #[test]
    fn leaf_paths_are_exhaustive() {
        let paths = leaf_paths();
        assert_eq!(paths.len(), 69);

        // Spot-check the deepest level and schema ordering
        assert_eq!(paths[0], vec!["home", "view"]);
        assert!(paths.contains(&vec!["parameters", "camera_sources", "cameras", "edit"]));
        assert!(paths.contains(&vec!["ord", "historical_search_faces", "view"]));
    }

    #[test]
    fn no_group_is_empty() {
        fn check(nodes: &[NodeSpec]) {
            for node in nodes {
                if let NodeSpec::Group { key, children } = node {
                    assert!(!children.is_empty(), "group `{key}` has no children");
                    check(children);
                }
            }
        }
        check(SCHEMA);
    }

    #[test]
    fn parse_path_resolves_leaves() {
        assert_eq!(
            parse_path("parameters.access_management.roles.delete").unwrap(),
            vec!["parameters", "access_management", "roles", "delete"]
        );
        assert_eq!(parse_path("home.view").unwrap(), vec!["home", "view"]);
    }

    #[test]
    fn parse_path_rejects_unknown_segments() {
        assert!(matches!(
            parse_path("parameters.nonexistent.view"),
            Err(PermissionError::UnknownSegment { .. })
        ));
    }

    #[test]
    fn parse_path_rejects_group_terminals() {
        assert!(matches!(
            parse_path("parameters.access_management"),
            Err(PermissionError::EndsOnGroup { .. })
        ));
    }

    #[test]
    fn parse_path_rejects_descending_through_a_flag() {
        assert!(matches!(
            parse_path("home.view.deeper"),
            Err(PermissionError::TraversesLeaf { .. })
        ));
    }

    #[test]
    fn parse_path_rejects_empty_input() {
        assert!(matches!(parse_path(""), Err(PermissionError::EmptyPath)));
        assert!(matches!(parse_path("..."), Err(PermissionError::EmptyPath)));
    }
}
