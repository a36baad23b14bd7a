//! Registry behavior tests
//!
//! Covers role definition, grants, alias expansion, extension and export.

use super::Registry;
use crate::config::RegistryConfig;
use crate::error::AbilitiesError;
use crate::types::Permission;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// define()
// ============================================================================

#[test]
fn test_define_creates_empty_role() {
    let mut registry = Registry::new();
    registry.define("role").unwrap();

    assert_eq!(registry.export()["role"], Vec::<String>::new());
    assert!(registry.contains_role("role"));
}

#[test]
fn test_redefine_discards_previous_permissions() {
    let mut registry = Registry::new();
    registry.define_with("role", |role| role.can("read", None)).unwrap();
    assert_eq!(registry.permissions("role").unwrap().len(), 1);

    registry.define("role").unwrap();
    assert!(registry.permissions("role").unwrap().is_empty());
}

#[test]
fn test_redefine_keeps_map_position() {
    let mut registry = Registry::new();
    registry.define("first").unwrap().define("second").unwrap();
    registry.define_with("first", |role| role.can("read", None)).unwrap();

    let names: Vec<_> = registry.role_names().collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn test_define_is_chainable() {
    let mut registry = Registry::new();
    registry
        .define("a")
        .unwrap()
        .define("b")
        .unwrap()
        .define_with("c", |role| role.extend(["a", "b"]))
        .unwrap();

    assert_eq!(registry.len(), 3);
}

#[test]
fn test_define_rejects_empty_name() {
    let mut registry = Registry::new();
    let err = registry.define("").unwrap_err();

    assert!(matches!(
        err,
        AbilitiesError::InvalidArgument { operation: "define", ref value } if value.is_empty()
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_setup_receives_bound_scope() {
    let mut registry = Registry::new();
    registry
        .define_with("bound", |role| {
            assert_eq!(role.name(), "bound");
            assert!(role.permissions().is_empty());
            Ok(())
        })
        .unwrap();
}

// ============================================================================
// can()
// ============================================================================

#[test_case("read", None, &["read"]; "bare permission")]
#[test_case("read", Some("blacklist"), &["read_blacklist"]; "resource qualified")]
#[test_case("manage", Some("x"), &["read_x", "edit_x", "delete_x"]; "builtin alias")]
#[test_case("manage", None, &["read", "edit", "delete"]; "builtin alias without resource")]
#[test_case("read", Some(""), &["read"]; "empty resource is ignored")]
fn test_can_single(permission: &str, resource: Option<&str>, expected: &[&str]) {
    let mut registry = Registry::new();
    registry
        .define_with("role", |role| role.can(permission, resource))
        .unwrap();

    assert_eq!(registry.permissions("role").unwrap(), expected);
}

#[test]
fn test_can_list_preserves_order() {
    let mut registry = Registry::new();
    registry
        .define_with("role", |role| role.can(["read", "write"], None))
        .unwrap();

    assert_eq!(registry.permissions("role").unwrap(), vec!["read", "write"]);
}

#[test]
fn test_can_with_alias_in_list() {
    let mut registry = Registry::new();
    registry
        .define_with("role", |role| {
            role.can(["permission1", "manage"], "resource")?;
            role.can("manage", "resource2")
        })
        .unwrap();

    assert_eq!(
        registry.permissions("role").unwrap(),
        vec![
            "permission1_resource",
            "read_resource",
            "edit_resource",
            "delete_resource",
            "read_resource2",
            "edit_resource2",
            "delete_resource2",
        ]
    );
}

#[test]
fn test_can_deduplicates_at_first_position() {
    let mut registry = Registry::new();
    registry
        .define_with("role", |role| {
            role.can("edit", "doc")?;
            role.can("manage", "doc")?;
            role.can(["read", "edit"], "doc")
        })
        .unwrap();

    assert_eq!(
        registry.permissions("role").unwrap(),
        vec!["edit_doc", "read_doc", "delete_doc"]
    );
}

#[test_case(json!(123); "number")]
#[test_case(json!({}); "object")]
#[test_case(json!(null); "null")]
#[test_case(json!([1, 2]); "array of numbers")]
fn test_can_rejects_invalid_argument(value: serde_json::Value) {
    let mut registry = Registry::new();
    let err = registry
        .define_with("role", |role| role.can(&value, "resource"))
        .unwrap_err();

    assert!(matches!(err, AbilitiesError::InvalidArgument { operation: "can", .. }));
}

#[test]
fn test_failed_grant_keeps_earlier_permissions() {
    let mut registry = Registry::new();
    let result = registry.define_with("role", |role| {
        role.can("read", None)?;
        role.can(json!(123), None)?;
        role.can("never", None)
    });

    assert!(result.is_err());
    assert_eq!(registry.permissions("role").unwrap(), vec!["read"]);
}

// ============================================================================
// alias()
// ============================================================================

#[test]
fn test_alias_array() {
    let mut registry = Registry::new();
    registry.alias("crud", ["create", "read", "update", "delete"]).unwrap();
    registry.define_with("role", |role| role.can(["crud"], "resource")).unwrap();

    assert_eq!(
        registry.permissions("role").unwrap(),
        vec!["create_resource", "read_resource", "update_resource", "delete_resource"]
    );
}

#[test]
fn test_alias_string() {
    let mut registry = Registry::new();
    registry.alias("update", "edit").unwrap();
    registry.define_with("role", |role| role.can(["update"], "resource")).unwrap();

    assert_eq!(registry.permissions("role").unwrap(), vec!["edit_resource"]);
}

#[test_case(json!(123); "number")]
#[test_case(json!({}); "object")]
fn test_alias_rejects_invalid_argument(value: serde_json::Value) {
    let mut registry = Registry::new();
    let err = registry.alias("crud", value).unwrap_err();

    assert!(matches!(err, AbilitiesError::InvalidArgument { operation: "alias", .. }));
    assert!(registry.alias_targets("crud").is_none());
}

#[test]
fn test_alias_redefinition_does_not_touch_existing_roles() {
    let mut registry = Registry::new();
    registry.define_with("before", |role| role.can("manage", "doc")).unwrap();
    registry.alias("manage", ["read"]).unwrap();
    registry.define_with("after", |role| role.can("manage", "doc")).unwrap();

    assert_eq!(
        registry.permissions("before").unwrap(),
        vec!["read_doc", "edit_doc", "delete_doc"]
    );
    assert_eq!(registry.permissions("after").unwrap(), vec!["read_doc"]);
}

#[test]
fn test_alias_targets_are_not_expanded_again() {
    let mut registry = Registry::new();
    registry.alias("admin", ["manage", "grant"]).unwrap();
    registry.define_with("role", |role| role.can("admin", "x")).unwrap();

    assert_eq!(registry.permissions("role").unwrap(), vec!["manage_x", "grant_x"]);
}

// ============================================================================
// extend()
// ============================================================================

#[test]
fn test_extend_single_role() {
    let mut registry = Registry::new();
    registry.define_with("role1", |role| role.can("permission1", None)).unwrap();
    registry
        .define_with("role2", |role| {
            role.extend("role1")?;
            role.can("permission2", None)
        })
        .unwrap();

    assert_eq!(
        registry.permissions("role2").unwrap(),
        vec!["permission1", "permission2"]
    );
}

#[test]
fn test_extend_multiple_roles_in_order() {
    let mut registry = Registry::new();
    registry.define_with("role1", |role| role.can("permission1", None)).unwrap();
    registry.define_with("role2", |role| role.can("permission2", None)).unwrap();
    registry.define_with("role3", |role| role.extend(["role1", "role2"])).unwrap();

    assert_eq!(
        registry.permissions("role3").unwrap(),
        vec!["permission1", "permission2"]
    );
}

#[test]
fn test_extend_collapses_conflicts() {
    let mut registry = Registry::new();
    registry.define_with("role_a", |role| role.can(["x", "p"], None)).unwrap();
    registry.define_with("role_b", |role| role.can(["p", "y"], None)).unwrap();
    registry.define_with("role_c", |role| role.extend(["role_a", "role_b"])).unwrap();

    assert_eq!(registry.permissions("role_c").unwrap(), vec!["x", "p", "y"]);
}

#[test]
fn test_extend_deduplicates_against_existing_grants() {
    let mut registry = Registry::new();
    registry.define_with("base", |role| role.can(["a", "b"], None)).unwrap();
    registry
        .define_with("derived", |role| {
            role.can("b", None)?;
            role.extend("base")
        })
        .unwrap();

    assert_eq!(registry.permissions("derived").unwrap(), vec!["b", "a"]);
}

#[test]
fn test_extend_missing_role() {
    let mut registry = Registry::new();
    let err = registry
        .define_with("role1", |role| role.extend("role"))
        .unwrap_err();

    match err {
        AbilitiesError::NotFound { operation, role } => {
            assert_eq!(operation, "extend");
            assert_eq!(role, "role");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_extend_failure_keeps_roles_listed_before() {
    let mut registry = Registry::new();
    registry.define_with("known", |role| role.can("a", None)).unwrap();

    let result = registry.define_with("partial", |role| role.extend(["known", "unknown"]));

    assert!(matches!(result, Err(AbilitiesError::NotFound { .. })));
    assert_eq!(registry.permissions("partial").unwrap(), vec!["a"]);
}

#[test]
fn test_extend_rejects_invalid_argument() {
    let mut registry = Registry::new();
    let err = registry
        .define_with("role", |role| role.extend(json!(42)))
        .unwrap_err();

    assert!(matches!(err, AbilitiesError::InvalidArgument { operation: "extend", .. }));
}

#[test]
fn test_extend_is_a_snapshot() {
    let mut registry = Registry::new();
    registry.define_with("base", |role| role.can("a", None)).unwrap();
    registry.define_with("derived", |role| role.extend("base")).unwrap();
    registry.define_with("base", |role| role.can("z", None)).unwrap();

    assert_eq!(registry.permissions("derived").unwrap(), vec!["a"]);
}

#[test]
fn test_extend_self_during_redefinition_sees_empty_role() {
    let mut registry = Registry::new();
    registry.define_with("role", |role| role.can("old", None)).unwrap();
    registry
        .define_with("role", |role| {
            role.extend("role")?;
            role.can("new", None)
        })
        .unwrap();

    assert_eq!(registry.permissions("role").unwrap(), vec!["new"]);
}

#[test]
fn test_extend_keeps_structured_permissions() {
    let mut registry = Registry::new();
    registry.define_with("base", |role| role.can("read", "a_b")).unwrap();
    registry.define_with("derived", |role| role.extend("base")).unwrap();

    let derived = registry.role("derived").unwrap();
    assert!(derived.contains(&Permission::on("read", "a_b")));
    assert!(!derived.contains(&Permission::on("read_a", "b")));
}

#[test]
fn test_colliding_pairs_count_differs_from_export() {
    let mut registry = Registry::new();
    registry
        .define_with("role", |role| {
            role.can("read_x", None)?;
            role.can("read", "x")?;
            role.can("y", None)
        })
        .unwrap();

    assert_eq!(registry.permissions("role").unwrap(), vec!["read_x", "y"]);
    assert_eq!(registry.role("role").unwrap().len(), 3);
}

// ============================================================================
// flush() / reset()
// ============================================================================

#[test]
fn test_flush_clears_roles_but_keeps_aliases() {
    let mut registry = Registry::new();
    registry.alias("crud", ["create", "read", "update", "delete"]).unwrap();
    registry.define("role").unwrap();

    registry.flush();

    assert!(registry.is_empty());
    assert!(registry.export().is_empty());
    assert_eq!(registry.alias_targets("crud").unwrap().len(), 4);
}

#[test]
fn test_reset_restores_builtin_aliases() {
    let mut registry = Registry::new();
    registry.alias("crud", ["create"]).unwrap();
    registry.alias("manage", ["read"]).unwrap();
    registry.define("role").unwrap();

    registry.reset();

    assert!(registry.is_empty());
    assert!(registry.alias_targets("crud").is_none());
    assert_eq!(registry.alias_targets("manage").unwrap(), ["read", "edit", "delete"]);
}

#[test]
fn test_registries_are_independent() {
    let mut first = Registry::new();
    let mut second = Registry::new();

    first.alias("crud", ["create"]).unwrap();
    first.define("only_here").unwrap();
    second.define_with("role", |role| role.can("crud", None)).unwrap();

    assert!(!second.contains_role("only_here"));
    assert_eq!(second.permissions("role").unwrap(), vec!["crud"]);
}

// ============================================================================
// export()
// ============================================================================

#[test]
fn test_export_all_roles() {
    let mut registry = Registry::new();
    registry.define_with("role1", |role| role.can("permission1", None)).unwrap();
    registry
        .define_with("role2", |role| {
            role.extend("role1")?;
            role.can("permission2", None)
        })
        .unwrap();

    assert_eq!(
        registry.to_json().unwrap(),
        json!({
            "role1": ["permission1"],
            "role2": ["permission1", "permission2"],
        })
    );
}

#[test]
fn test_export_string_keeps_definition_order() {
    let mut registry = Registry::new();
    registry.define_with("zeta", |role| role.can("a", None)).unwrap();
    registry.define("alpha").unwrap();

    assert_eq!(
        registry.to_json_string().unwrap(),
        r#"{"zeta":["a"],"alpha":[]}"#
    );
}

#[test]
fn test_export_is_a_copy() {
    let mut registry = Registry::new();
    registry.define_with("role", |role| role.can("read", None)).unwrap();

    let mut exported = registry.export();
    exported.get_mut("role").unwrap().push("tampered".to_string());

    assert_eq!(registry.permissions("role").unwrap(), vec!["read"]);
}

#[test]
fn test_custom_separator() {
    let config = RegistryConfig::default().with_separator(":");
    let mut registry = Registry::with_config(config);
    registry.define_with("role", |role| role.can("manage", "doc")).unwrap();

    assert_eq!(
        registry.permissions("role").unwrap(),
        vec!["read:doc", "edit:doc", "delete:doc"]
    );
}

#[test]
fn test_without_builtin_aliases() {
    let config = RegistryConfig::default().with_builtin_aliases(false);
    let mut registry = Registry::with_config(config);
    registry.define_with("role", |role| role.can("manage", "doc")).unwrap();

    assert_eq!(registry.permissions("role").unwrap(), vec!["manage_doc"]);
}

#[test]
fn test_end_to_end_reader_editor() {
    let mut registry = Registry::new();
    registry
        .define_with("reader", |role| role.can("read", "blacklist"))
        .unwrap()
        .define_with("editor", |role| {
            role.extend("reader")?;
            role.can("manage", "campaigns")
        })
        .unwrap();

    assert_eq!(
        registry.to_json().unwrap(),
        json!({
            "reader": ["read_blacklist"],
            "editor": ["read_blacklist", "read_campaigns", "edit_campaigns", "delete_campaigns"],
        })
    );
}
