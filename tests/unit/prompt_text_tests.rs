use super::*;

#[test]
fn strips_metadata_block_and_heading() {
    let input = "---\nauthor: x\n---\n# Greeting\nHello, how can I help?\n";
    assert_eq!(extract_prompt_text(input), "Hello, how can I help?");
}

#[test]
fn plain_text_is_only_trimmed() {
    assert_eq!(
        extract_prompt_text("\n  You are a helpful agent.\nBe brief.  \n\n"),
        "You are a helpful agent.\nBe brief."
    );
}

#[test]
fn metadata_block_removal_keeps_following_text_intact() {
    let input = "---\ntitle: a\ntags: [b, c]\n---\nFirst line\n---\nnot metadata\n";
    assert_eq!(
        extract_prompt_text(input),
        "First line\n---\nnot metadata"
    );
}

#[test]
fn unclosed_metadata_block_is_left_alone() {
    let input = "---\nauthor: x\nBody";
    assert_eq!(extract_prompt_text(input), input);
}

#[test]
fn metadata_block_must_start_the_text() {
    let input = "Intro\n---\nauthor: x\n---\nBody";
    assert_eq!(extract_prompt_text(input), input);
}

#[test]
fn only_first_level_one_heading_is_removed() {
    let input = "# Title\nBody\n# Second\n## Sub\ntext";
    assert_eq!(extract_prompt_text(input), "Body\n# Second\n## Sub\ntext");
}

#[test]
fn deeper_headings_and_hashtags_are_not_treated_as_title() {
    let input = "## Role\n#hashtag\nBody";
    assert_eq!(extract_prompt_text(input), input);
}

#[test]
fn heading_after_intro_text_is_removed_in_place() {
    let input = "Intro\n# Title\nBody";
    assert_eq!(extract_prompt_text(input), "Intro\n\nBody");
}

#[test]
fn crlf_input_is_handled() {
    let input = "---\r\nauthor: x\r\n---\r\n# Title\r\nLine one\r\nLine two\r\n";
    assert_eq!(extract_prompt_text(input), "Line one\r\nLine two");
}

#[test]
fn extraction_is_idempotent_for_typical_prompts() {
    let inputs = [
        "---\nauthor: x\n---\n# Greeting\nHello, how can I help?\n",
        "# Support\n\nYou help customers.\n\n## Rules\n- be kind\n",
        "No heading at all",
    ];
    for input in inputs {
        let once = extract_prompt_text(input);
        assert_eq!(extract_prompt_text(&once), once, "input: {input:?}");
    }
}

#[test]
fn empty_input_yields_empty_text() {
    assert_eq!(extract_prompt_text(""), "");
    assert_eq!(extract_prompt_text("---\n---\n# Only a title\n"), "");
}

#[test]
fn preview_truncates_on_characters() {
    let long = "é".repeat(60);
    let shown = preview(&long, DEFAULT_PREVIEW_CHARS);
    assert_eq!(shown.chars().count(), DEFAULT_PREVIEW_CHARS + 3);
    assert!(shown.ends_with("..."));
    assert_eq!(preview("short", DEFAULT_PREVIEW_CHARS), "short");
}

#[test]
fn indented_level_one_heading_is_removed() {
    assert_eq!(
        extract_prompt_text("---\nauthor: x\n---\n  # Greeting\nHello"),
        "Hello"
    );
    assert_eq!(extract_prompt_text("\t# Greeting\nHello"), "Hello");
}

#[test]
fn metadata_block_after_leading_blank_lines_is_removed() {
    assert_eq!(
        extract_prompt_text("\n---\nauthor: x\n---\n# Greeting\nHello"),
        "Hello"
    );
    assert_eq!(
        extract_prompt_text(" \r\n\n---\r\nauthor: x\r\n---\r\nHello"),
        "Hello"
    );
}
