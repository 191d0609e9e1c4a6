use recipe_clipper::sanitize_instructions;

#[test]
fn strips_ingredient_block_and_keeps_instructions() {
    let input = "Ingredients:\n2 cups flour\n1 cup sugar\nInstructions:\n1. Mix well.\n2. Bake at 350F.";
    let cleaned = sanitize_instructions(input);

    assert_eq!(cleaned, "Instructions:\n1. Mix well.\n2. Bake at 350F.");
}

#[test]
fn heading_without_following_section_strips_through_block() {
    let input = "Ingredients:\n2 cups flour\n1 tsp salt";
    assert_eq!(sanitize_instructions(input), "");
}

#[test]
fn is_idempotent() {
    let samples = [
        "Ingredients:\n2 cups flour\n1 cup sugar\nInstructions:\n1. Mix well.\n2. Bake at 350F.",
        "Stir constantly for 10 minutes, then rest the dough.",
        "Method:\nFold gently.\n- 3 tbsp olive oil\nServe warm.",
        "",
    ];
    for sample in samples {
        let once = sanitize_instructions(sample);
        let twice = sanitize_instructions(&once);
        assert_eq!(once, twice, "not idempotent for {sample:?}");
    }
}

#[test]
fn truncates_oversized_input() {
    // 200k chars of line-structured text; must complete and only operate
    // on the first 100k.
    let input = "keep stirring the pot\n".repeat(10_000);
    assert!(input.chars().count() > 200_000);

    let cleaned = sanitize_instructions(&input);
    assert!(cleaned.chars().count() <= 100_000);
}

#[test]
fn keeps_prose_mentioning_units_without_list_markers() {
    let input = "Add the flour a cup at a time, whisking as you go.";
    assert_eq!(sanitize_instructions(input), input);
}

#[test]
fn drops_dash_and_bullet_measurement_lines() {
    let input = "Preheat the oven.\n- 250 g chocolate\n• 2 cups cream\nMelt together.";
    assert_eq!(sanitize_instructions(input), "Preheat the oven.\nMelt together.");
}
