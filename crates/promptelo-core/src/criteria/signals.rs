//! Individual signal heuristics behind [`CriterionScores`](super::CriterionScores).
//!
//! Each criterion starts from a base score and accumulates fixed bonuses or
//! penalties per matched signal family, clamped to `[0, 1]`. Specificity
//! signals are strictly additive: adding a concrete token can raise the
//! score but never lower it.

use std::sync::LazyLock;

use regex::Regex;

macro_rules! pattern {
    ($name:ident, $re:literal) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect("pattern is valid"));
    };
}

// Clarity.
pattern!(
    CLEAR_VERBS,
    r"(?i)\b(create|build|write|implement|add|remove|fix|update|refactor|test|debug|explain|analyze|compare|list|show|find|search|generate|convert|parse|validate|check)\b"
);
pattern!(
    QUESTION_WORDS,
    r"(?i)\b(how|what|why|where|when|which|can you|could you|please)\b"
);
pattern!(
    HEDGE_WORDS,
    r"(?i)\b(something|somehow|maybe|probably|sort of|kind of|stuff|things)\b"
);
// A bare pronoun with nothing after it ("fix it.", "change that"). The
// regex crate has no lookahead, so the dangling case is matched directly.
pattern!(DANGLING_PRONOUN, r"(?i)\b(it|this|that)\b\s*([.!?,;:]|$)");
pattern!(SENTENCE_SPLIT, "[.!?]+");
pattern!(FORMATTING, r"```|`[^`]+`|\n[-*]\s|\n\d+\.");

// Specificity.
pattern!(FILE_PATH, r"[\w/]+\.\w{1,5}\b|[\w/]+/[\w/]+");
pattern!(IDENTIFIER, r"\b[a-z]+[A-Z]\w*|[A-Z][a-z]+[A-Z]\w*|\b\w+_\w+\b");
pattern!(INLINE_CODE, r"`[^`]+`");
pattern!(
    TECH_LANGUAGE,
    r"(?i)\b(function|class|method|variable|parameter|argument|return|type|interface|module|package|import|export|async|await|promise|callback|API|endpoint|database|query|schema|migration)\b"
);
pattern!(
    TECH_ERRORS,
    r"(?i)\b(error|exception|bug|issue|crash|undefined|null|NaN|stack trace)\b"
);
pattern!(
    TECH_TESTING,
    r"(?i)\b(test|unit test|integration|mock|stub|fixture|assertion)\b"
);
pattern!(NUMERIC, r"\b\d+\b");

// Context.
pattern!(
    CURRENT_STATE,
    r"(?i)\b(currently|right now|at the moment|existing|current)\b"
);
pattern!(
    OWNERSHIP,
    r"(?i)\b(I have|I'm using|I'm working on|my project|our codebase)\b"
);
pattern!(CAUSAL, r"(?i)\b(because|since|as|due to|the reason)\b");
pattern!(
    GOAL,
    r"(?i)\b(want to|need to|trying to|goal is|objective is)\b"
);
pattern!(
    MODAL_CONSTRAINT,
    r"(?i)\b(must|should|cannot|shouldn't|don't want|avoid|without|only|prefer)\b"
);
pattern!(
    COMPATIBILITY,
    r"(?i)\b(compatible|support|work with|integrate)\b"
);
pattern!(
    QUALITY_ATTRIBUTE,
    r"(?i)\b(performance|security|scalability|maintainability)\b"
);
pattern!(
    ENVIRONMENT,
    r"(?i)\b(version|v\d|node|python|npm|pip|docker|OS|linux|mac|windows)\b"
);
pattern!(
    ERROR_OUTPUT,
    r"(?i)error:|exception|traceback|at line \d+"
);

// Creativity.
pattern!(
    EXPLORATORY,
    r"(?i)\b(explore|experiment|try|investigate|consider|alternative|different approach|other ways)\b"
);
pattern!(
    OPEN_QUESTION,
    r"(?i)\b(what if|could we|is there a way|would it be possible)\b"
);
pattern!(
    IMPROVEMENT,
    r"(?i)\b(optimize|improve|enhance|better|best practice|elegant|clean)\b"
);
pattern!(
    COMBINATION,
    r"(?i)\b(combine|merge|integrate|connect|bridge|link)\b"
);
pattern!(
    CONJUNCTION_CHAIN,
    r"(?i)\b(and|with|plus|alongside|together)\b.*\b(and|with|plus)\b"
);
pattern!(
    CREATIVE_KEYWORD,
    r"(?i)\b(creative|novel|unique|innovative|unconventional|clever)\b"
);
pattern!(
    DESIGN_KEYWORD,
    r"(?i)\b(design|architect|pattern|strategy|approach)\b"
);
pattern!(BOILERPLATE_OPENER, r"(?i)^(fix|help|how do I|what is)\s");
pattern!(
    BOILERPLATE_TOPIC,
    r"(?i)\b(hello world|todo app|CRUD|basic|simple example)\b"
);

fn clamp01(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// Clarity: clear intent, structure, and absence of vague language.
pub fn clarity(text: &str) -> f64 {
    let mut score = 0.5;

    if CLEAR_VERBS.is_match(text) {
        score += 0.1;
    }
    if QUESTION_WORDS.is_match(text) {
        score += 0.1;
    }
    for vague in [&*HEDGE_WORDS, &*DANGLING_PRONOUN] {
        if vague.is_match(text) {
            score -= 0.1;
        }
    }

    let sentences = SENTENCE_SPLIT
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    if sentences >= 2 {
        score += 0.1;
    }
    if FORMATTING.is_match(text) {
        score += 0.1;
    }

    clamp01(score)
}

/// Specificity: concrete technical detail. Strictly additive signals.
pub fn specificity(text: &str) -> f64 {
    let mut score = 0.3;

    if FILE_PATH.is_match(text) {
        score += 0.15;
    }
    if IDENTIFIER.is_match(text) {
        score += 0.1;
    }
    if text.contains("```") || INLINE_CODE.is_match(text) {
        score += 0.15;
    }
    for family in [&*TECH_LANGUAGE, &*TECH_ERRORS, &*TECH_TESTING] {
        if family.is_match(text) {
            score += 0.05;
        }
    }
    if NUMERIC.is_match(text) {
        score += 0.1;
    }

    let word_count = text.split_whitespace().count();
    if word_count > 50 {
        score += 0.1;
    } else if word_count > 20 {
        score += 0.05;
    }

    clamp01(score)
}

/// Context: background, constraints, and environment detail.
pub fn context(text: &str) -> f64 {
    let mut score = 0.3;

    for background in [&*CURRENT_STATE, &*OWNERSHIP, &*CAUSAL, &*GOAL] {
        if background.is_match(text) {
            score += 0.1;
        }
    }
    for constraint in [&*MODAL_CONSTRAINT, &*COMPATIBILITY, &*QUALITY_ATTRIBUTE] {
        if constraint.is_match(text) {
            score += 0.1;
        }
    }
    if ENVIRONMENT.is_match(text) {
        score += 0.1;
    }
    if ERROR_OUTPUT.is_match(text) {
        score += 0.15;
    }

    clamp01(score)
}

/// Creativity: exploratory phrasing and non-boilerplate framing.
pub fn creativity(text: &str) -> f64 {
    let mut score = 0.4;

    for exploratory in [&*EXPLORATORY, &*OPEN_QUESTION, &*IMPROVEMENT] {
        if exploratory.is_match(text) {
            score += 0.1;
        }
    }
    for concept in [&*COMBINATION, &*CONJUNCTION_CHAIN] {
        if concept.is_match(text) {
            score += 0.1;
        }
    }
    for keyword in [&*CREATIVE_KEYWORD, &*DESIGN_KEYWORD] {
        if keyword.is_match(text) {
            score += 0.1;
        }
    }
    for common in [&*BOILERPLATE_OPENER, &*BOILERPLATE_TOPIC] {
        if common.is_match(text) {
            score -= 0.05;
        }
    }

    clamp01(score)
}
