//! Console sections and permission-based visibility filtering.

use vigil_core::PermissionTree;

/// One entry of the console's section bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub route: &'static str,
    pub label: &'static str,
    /// Module whose `view` flag gates this entry. `None` means the entry
    /// is visible to every authenticated operator.
    pub required_module: Option<&'static [&'static str]>,
}

/// The console sections, in display order.
///
/// Only the dashboard is unconditional; every other section is hidden
/// unless the operator's effective tree grants the module's `view` flag.
pub const NAV_ITEMS: &[NavEntry] = &[
    NavEntry {
        route: "/dashboard",
        label: "Dashboard",
        required_module: None,
    },
    NavEntry {
        route: "/monitoring",
        label: "Monitoring",
        required_module: Some(&["monitoring"]),
    },
    NavEntry {
        route: "/ord",
        label: "Operational search",
        required_module: Some(&["ord"]),
    },
    NavEntry {
        route: "/layouts",
        label: "Layouts",
        required_module: Some(&["layouts"]),
    },
    NavEntry {
        route: "/reports",
        label: "Reports",
        required_module: Some(&["reports"]),
    },
    NavEntry {
        route: "/photo-archive",
        label: "Photo archive",
        required_module: Some(&["photo_archive"]),
    },
    NavEntry {
        route: "/parameters",
        label: "Parameters",
        required_module: Some(&["parameters"]),
    },
    NavEntry {
        route: "/viss",
        label: "VISS",
        required_module: Some(&["parameters", "vvs"]),
    },
];

/// Filters entries down to what the operator may see.
///
/// Stable: surviving entries keep their input order. An entry survives
/// when it requires nothing or its module's `view` flag is granted.
pub fn filter_navigation<'a>(
    tree: &PermissionTree,
    entries: &'a [NavEntry],
) -> Vec<&'a NavEntry> {
    entries
        .iter()
        .filter(|entry| match entry.required_module {
            None => true,
            Some(module) => tree.can_view(module),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_tree_leaves_only_unconditional_entries() {
        let tree = PermissionTree::all_denied();
        let visible = filter_navigation(&tree, NAV_ITEMS);

        let routes: Vec<&str> = visible.iter().map(|e| e.route).collect();
        assert_eq!(routes, vec!["/dashboard"]);
    }

    #[test]
    fn filtering_is_stable_and_per_module() {
        let entries = [
            NavEntry {
                route: "/dashboard",
                label: "Dashboard",
                required_module: None,
            },
            NavEntry {
                route: "/ord",
                label: "Operational search",
                required_module: Some(&["ord"]),
            },
            NavEntry {
                route: "/monitoring",
                label: "Monitoring",
                required_module: Some(&["monitoring"]),
            },
        ];
        let tree = PermissionTree::all_denied()
            .with(&["monitoring", "view"], true)
            .unwrap();

        let routes: Vec<&str> = filter_navigation(&tree, &entries)
            .iter()
            .map(|e| e.route)
            .collect();

        assert_eq!(routes, vec!["/dashboard", "/monitoring"]);
    }

    #[test]
    fn nested_module_gates_resolve_through_the_tree() {
        let tree = PermissionTree::all_denied()
            .with(&["parameters", "vvs", "view"], true)
            .unwrap();

        let visible = filter_navigation(&tree, NAV_ITEMS);
        let routes: Vec<&str> = visible.iter().map(|e| e.route).collect();

        // parameters itself stays hidden; only its nested VISS module is granted
        assert_eq!(routes, vec!["/dashboard", "/viss"]);
    }
}
