use super::signals;
use super::{Criterion, CriterionScores};

#[test]
fn all_scores_in_range_for_varied_inputs() {
    let long = "word ".repeat(500);
    let inputs = [
        "",
        "fix it",
        "Implement a parser for TOML in src/config.rs with unit tests.",
        "asdf qwerty zxcv",
        "🦀🦀🦀",
        long.as_str(),
        "```\nfn main() {}\n```",
    ];

    for input in inputs {
        let scores = CriterionScores::analyze(input);
        for criterion in Criterion::LOCAL {
            let score = scores.get(criterion);
            assert!(
                (0.0..=1.0).contains(&score),
                "{criterion} = {score} out of range for {input:?}"
            );
        }
    }
}

#[test]
fn empty_string_yields_base_scores() {
    let scores = CriterionScores::analyze("");

    assert_eq!(scores.clarity, 0.5);
    assert_eq!(scores.specificity, 0.3);
    assert_eq!(scores.context, 0.3);
    assert_eq!(scores.creativity, 0.4);
}

#[test]
fn scoring_is_deterministic() {
    let prompt = "Refactor the parser module to return Result instead of panicking.";

    let first = CriterionScores::analyze(prompt);
    let second = CriterionScores::analyze(prompt);

    assert_eq!(first, second);
}

#[test]
fn file_path_never_decreases_specificity() {
    let base = "update the parser";
    let with_path = "update the parser in src/lexer.rs";

    let without = signals::specificity(base);
    let with = signals::specificity(with_path);

    assert!(
        with > without,
        "adding a file path should raise specificity ({without} -> {with})"
    );
}

#[test]
fn concrete_tokens_are_additive() {
    // Each addition can only add signal families, never remove them.
    let steps = [
        "update the code",
        "update the code in src/lexer.rs",
        "update the code in src/lexer.rs, function `tokenize_line`",
        "update the code in src/lexer.rs, function `tokenize_line`, to handle 3 edge cases",
    ];

    let mut previous = 0.0;
    for step in steps {
        let score = signals::specificity(step);
        assert!(
            score >= previous,
            "specificity dropped from {previous} to {score} at {step:?}"
        );
        previous = score;
    }
}

#[test]
fn clear_verbs_raise_clarity() {
    assert!(signals::clarity("implement the feature") > signals::clarity("the feature"));
}

#[test]
fn hedge_words_lower_clarity() {
    let vague = signals::clarity("do something with the stuff in there somehow");
    let direct = signals::clarity("rename the field in the config struct");

    assert!(vague < direct);
}

#[test]
fn dangling_pronoun_lowers_clarity() {
    let dangling = signals::clarity("please fix it.");
    let anchored = signals::clarity("please fix the login handler.");

    assert!(dangling < anchored);
}

#[test]
fn formatting_raises_clarity() {
    let plain = "add the steps first second third";
    let formatted = "add the steps\n- first\n- second\n- third";

    assert!(signals::clarity(formatted) > signals::clarity(plain));
}

#[test]
fn multiple_sentences_raise_clarity() {
    let one = signals::clarity("describe the deploy process");
    let two = signals::clarity("describe the deploy process. Focus on rollbacks.");

    assert!(two > one);
}

#[test]
fn error_output_raises_context() {
    let without = signals::context("the build stopped working");
    let with = signals::context("the build stopped working: error: linker `cc` not found");

    assert!(with > without);
}

#[test]
fn background_phrasing_raises_context() {
    let bare = signals::context("add caching");
    let grounded =
        signals::context("I'm working on a web service and need to add caching because responses are slow");

    assert!(grounded > bare);
}

#[test]
fn exploratory_phrasing_raises_creativity() {
    let plain = signals::creativity("change the sort order");
    let exploratory =
        signals::creativity("is there a way to explore alternative sort orders and compare trade-offs");

    assert!(exploratory > plain);
}

#[test]
fn boilerplate_openers_lower_creativity() {
    let boilerplate = signals::creativity("what is a hashmap");
    let framed = signals::creativity("walk me through when a hashmap beats a btree");

    assert!(boilerplate < framed);
}

#[test]
fn heavily_loaded_prompt_stays_clamped() {
    let prompt = "Currently I'm working on my project because I need to integrate and support \
                  performance, security, and scalability. It must work with docker on linux, \
                  node version 20. error: something failed, exception at line 42.";
    let score = signals::context(prompt);

    assert!(score <= 1.0);
    assert!(score > 0.9, "every context family should have fired: {score}");
}

#[test]
fn lowest_returns_weakest_criterion() {
    let scores = CriterionScores {
        clarity: 0.9,
        specificity: 0.4,
        context: 0.8,
        creativity: 0.7,
    };

    let (criterion, score) = scores.lowest();
    assert_eq!(criterion, Criterion::Specificity);
    assert_eq!(score, 0.4);
}

#[test]
fn lowest_ties_resolve_in_canonical_order() {
    let scores = CriterionScores {
        clarity: 0.5,
        specificity: 0.5,
        context: 0.5,
        creativity: 0.5,
    };

    assert_eq!(scores.lowest().0, Criterion::Clarity);
}

#[test]
fn min_matches_lowest_score() {
    let scores = CriterionScores {
        clarity: 0.6,
        specificity: 0.3,
        context: 0.9,
        creativity: 0.5,
    };

    assert_eq!(scores.min(), 0.3);
}

#[test]
fn criterion_names_are_stable() {
    assert_eq!(Criterion::Clarity.as_str(), "clarity");
    assert_eq!(Criterion::Specificity.as_str(), "specificity");
    assert_eq!(Criterion::Context.as_str(), "context");
    assert_eq!(Criterion::Creativity.as_str(), "creativity");
    assert_eq!(Criterion::Novelty.as_str(), "novelty");
}
