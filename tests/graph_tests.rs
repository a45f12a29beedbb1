//! Recipe graph validation tests
//!
//! Exercises `validate_recipe_graph` through the public surface only,
//! with recipes parsed from inline YAML the way callers supply them.

use mise::{validate_recipe_graph, FixSuggestion, MiseError, Recipe};

fn recipe(yaml: &str) -> Recipe {
    serde_yaml::from_str(yaml).unwrap()
}

// ============================================================================
// VALID RECIPES
// ============================================================================

#[test]
fn linear_chain_is_valid() {
    let recipe = recipe(
        r#"
name: miso soup
ingredients:
  - { name: dashi, quantity: 400, unit: ml }
  - { name: miso, quantity: 2, unit: tbsp }
steps:
  - processId: PROCESS[dashi]
    title: bring the dashi to a simmer
    required: []
    requiredGroups: ["GROUP[soup]"]
  - processId: PROCESS[miso]
    title: dissolve the miso
    required: ["PROCESS[dashi]"]
    requiredGroups: ["GROUP[soup]"]
  - processId: PROCESS[serve]
    title: ladle into bowls
    required: ["PROCESS[miso]"]
    requiredGroups: ["GROUP[soup]"]
"#,
    );

    assert_eq!(validate_recipe_graph(&recipe), Ok(()));
}

#[test]
fn recurring_process_id_resolves_to_first_position() {
    let recipe = recipe(
        r#"
name: risotto
steps:
  - processId: PROCESS[stir]
    title: stir in the first ladle
    required: []
    requiredGroups: ["GROUP[rice]"]
  - processId: PROCESS[stir]
    title: stir in the second ladle
    required: ["PROCESS[stir]"]
    requiredGroups: ["GROUP[rice]"]
"#,
    );

    assert_eq!(validate_recipe_graph(&recipe), Ok(()));
}

#[test]
fn disjoint_groups_are_validated_independently() {
    let recipe = recipe(
        r#"
name: steak and salad
steps:
  - processId: PROCESS[grill]
    title: grill the steak
    required: []
    requiredGroups: ["GROUP[steak]"]
  - processId: PROCESS[rest]
    title: rest the steak
    required: ["PROCESS[grill]"]
    requiredGroups: ["GROUP[steak]"]
  - processId: PROCESS[dress]
    title: dress the salad
    required: []
    requiredGroups: ["GROUP[salad]"]
"#,
    );

    assert_eq!(validate_recipe_graph(&recipe), Ok(()));
}

// ============================================================================
// VIOLATIONS
// ============================================================================

#[test]
fn duplicate_group_is_reported_with_its_id() {
    let recipe = recipe(
        r#"
name: broken
steps:
  - processId: PROCESS[knead]
    title: knead the dough
    required: []
    requiredGroups: ["GROUP[dough]", "GROUP[dough]"]
"#,
    );

    let err = validate_recipe_graph(&recipe).unwrap_err();
    assert_eq!(err.to_string(), "MISE-010: Duplicate required group GROUP[dough]");
    assert!(err.fix_suggestion().is_some());
}

#[test]
fn cycle_is_reported_with_the_closing_id() {
    let recipe = recipe(
        r#"
name: broken
steps:
  - processId: PROCESS[1]
    title: first
    required: ["PROCESS[2]"]
    requiredGroups: ["GROUP[1]"]
  - processId: PROCESS[2]
    title: second
    required: ["PROCESS[1]"]
    requiredGroups: ["GROUP[1]"]
"#,
    );

    let err = validate_recipe_graph(&recipe).unwrap_err();
    assert_eq!(err.to_string(), "MISE-013: Loop detected PROCESS[1]");
}

#[test]
fn dangling_required_id_is_reported() {
    let recipe = recipe(
        r#"
name: broken
steps:
  - processId: PROCESS[1]
    title: first
    required: ["PROCESS[2]"]
    requiredGroups: ["GROUP[1]"]
"#,
    );

    assert!(matches!(
        validate_recipe_graph(&recipe),
        Err(MiseError::ProcessIdNotFound { .. })
    ));
}

#[test]
fn required_id_in_foreign_group_is_dangling() {
    // The required step exists, but under a requirement group the
    // depending step does not share, so the walk cannot reach it.
    let recipe = recipe(
        r#"
name: broken
steps:
  - processId: PROCESS[sauce]
    title: reduce the sauce
    required: ["PROCESS[stock]"]
    requiredGroups: ["GROUP[sauce]"]
  - processId: PROCESS[stock]
    title: make the stock
    required: []
    requiredGroups: ["GROUP[stock]"]
"#,
    );

    assert!(matches!(
        validate_recipe_graph(&recipe),
        Err(MiseError::ProcessIdNotFound { .. })
    ));
}

#[test]
fn first_violation_wins_in_declaration_order() {
    // Step one carries a duplicate group; step two a dangling id. The
    // duplicate group is reported because its step is declared first.
    let recipe = recipe(
        r#"
name: broken
steps:
  - processId: PROCESS[1]
    title: first
    required: []
    requiredGroups: ["GROUP[a]", "GROUP[a]"]
  - processId: PROCESS[2]
    title: second
    required: ["PROCESS[missing]"]
    requiredGroups: ["GROUP[b]"]
"#,
    );

    assert!(matches!(
        validate_recipe_graph(&recipe),
        Err(MiseError::DuplicateRequiredGroup { .. })
    ));
}
