use std::sync::LazyLock;

use crate::model::{TriggerCategory, TriggerDefinition, TriggerOrigin};

fn builtin(
    keyword: &str,
    category: TriggerCategory,
    instruction: &str,
    example: &str,
) -> TriggerDefinition {
    TriggerDefinition {
        keyword: keyword.to_owned(),
        category,
        instruction: instruction.to_owned(),
        example: Some(example.to_owned()),
        enabled: true,
        origin: TriggerOrigin::BuiltIn,
    }
}

/// The built-in trigger catalog, in registry iteration order
pub(crate) static BUILT_IN_TRIGGERS: LazyLock<Vec<TriggerDefinition>> = LazyLock::new(|| {
    use TriggerCategory::*;
    vec![
        builtin(
            "reason",
            Reasoning,
            "<reason>Use logical, step-by-step reasoning to reach conclusions clearly and coherently.</reason>final_response",
            "Use \"reason\" to analyze complex problems systematically.",
        ),
        builtin(
            "analyze",
            Reasoning,
            "<analyze>Break down the topic into parts, identify relationships, and explain underlying logic.</analyze>final_response",
            "Use \"analyze\" to examine data or concepts in depth.",
        ),
        builtin(
            "critique",
            Reasoning,
            "<critique>Evaluate the strengths, weaknesses, and biases of the subject objectively.</critique>final_response",
            "Use \"critique\" to assess arguments or work critically.",
        ),
        builtin(
            "debate",
            Reasoning,
            "<debate>Present arguments for and against the issue before summarizing.</debate>final_response",
            "Use \"debate\" to explore multiple perspectives.",
        ),
        builtin(
            "compare",
            Reasoning,
            "<compare>Identify similarities and differences between the items or ideas.</compare>final_response",
            "Use \"compare\" to evaluate similar concepts.",
        ),
        builtin(
            "evaluate",
            Reasoning,
            "<evaluate>Judge the quality, relevance, and strength of evidence.</evaluate>final_response",
            "Use \"evaluate\" to assess merit or value.",
        ),
        builtin(
            "verify",
            Reasoning,
            "<verify>Check the accuracy and consistency of statements or data.</verify>final_response",
            "Use \"verify\" to confirm facts.",
        ),
        builtin(
            "reflect",
            Reasoning,
            "<reflect>Offer thoughtful insights and implications drawn from the topic.</reflect>final_response",
            "Use \"reflect\" for deeper understanding.",
        ),
        builtin(
            "troubleshoot",
            Reasoning,
            "<troubleshoot>Identify problems, diagnose causes, and propose corrective steps.</troubleshoot>final_response",
            "Use \"troubleshoot\" to solve issues.",
        ),
        builtin(
            "search",
            Research,
            "<search>Perform a brief lookup and present concise factual information.</search>final_response",
            "Use \"search\" for quick factual lookups.",
        ),
        builtin(
            "deep research",
            Research,
            "<deep_research>Conduct an in-depth, multi-source investigation and summarize findings.</deep_research>final_response",
            "Use \"deep research\" for comprehensive investigations.",
        ),
        builtin(
            "fact check",
            Research,
            "<fact_check>Verify factual accuracy and highlight uncertain or false parts.</fact_check>final_response",
            "Use \"fact check\" to verify claims.",
        ),
        builtin(
            "summarize",
            Research,
            "<summarize>Condense material into essential meaning and main points.</summarize>final_response",
            "Use \"summarize\" to get key points.",
        ),
        builtin(
            "outline",
            Research,
            "<outline>Produce a structured outline or bullet framework.</outline>final_response",
            "Use \"outline\" to create structure.",
        ),
        builtin(
            "extract",
            Research,
            "<extract>Pull out the most relevant facts, names, or data points.</extract>final_response",
            "Use \"extract\" to identify key information.",
        ),
        builtin(
            "define",
            Research,
            "<define>Provide precise definitions and short explanations of terms.</define>final_response",
            "Use \"define\" to explain terms.",
        ),
        builtin(
            "explain",
            Research,
            "<explain>Clarify concepts with simple language and examples.</explain>final_response",
            "Use \"explain\" for clear understanding.",
        ),
        builtin(
            "clarify",
            Research,
            "<clarify>Remove ambiguity and restate ideas for better understanding.</clarify>final_response",
            "Use \"clarify\" to remove confusion.",
        ),
        builtin(
            "plan",
            Planning,
            "<plan>Generate a logical step-by-step process to achieve the goal.</plan>final_response",
            "Use \"plan\" to create action plans.",
        ),
        builtin(
            "roadmap",
            Planning,
            "<roadmap>Lay out key milestones and paths toward completion.</roadmap>final_response",
            "Use \"roadmap\" for project planning.",
        ),
        builtin(
            "checklist",
            Planning,
            "<checklist>Present a task list to complete the objective.</checklist>final_response",
            "Use \"checklist\" for task lists.",
        ),
        builtin(
            "organize",
            Planning,
            "<organize>Arrange ideas or data into clear categories.</organize>final_response",
            "Use \"organize\" to structure information.",
        ),
        builtin(
            "prioritize",
            Planning,
            "<prioritize>Order tasks or ideas by importance or urgency.</prioritize>final_response",
            "Use \"prioritize\" to rank importance.",
        ),
        builtin(
            "brainstorm",
            Planning,
            "<brainstorm>Generate creative ideas without evaluation.</brainstorm>final_response",
            "Use \"brainstorm\" for idea generation.",
        ),
        builtin(
            "draft",
            Planning,
            "<draft>Create an initial version with key sections.</draft>final_response",
            "Use \"draft\" to build first versions.",
        ),
        builtin(
            "review",
            Planning,
            "<review>Evaluate content and summarize potential revisions.</review>final_response",
            "Use \"review\" for evaluation.",
        ),
        builtin(
            "simplify",
            Communication,
            "<simplify>Rephrase complex ideas into plain language.</simplify>final_response",
            "Use \"simplify\" to make content easier.",
        ),
        builtin(
            "formalize",
            Communication,
            "<formalize>Convert tone into a professional register.</formalize>final_response",
            "Use \"formalize\" for academic tone.",
        ),
        builtin(
            "rephrase",
            Communication,
            "<rephrase>Rewrite content using different wording with identical meaning.</rephrase>final_response",
            "Use \"rephrase\" to change wording.",
        ),
        builtin(
            "summarize for kids",
            Communication,
            "<summarize_for_kids>Explain the idea in age-appropriate, simple terms.</summarize_for_kids>final_response",
            "Use \"summarize for kids\" for child-friendly explanations.",
        ),
        builtin(
            "persuasive",
            Communication,
            "<persuasive>Use logical appeals and evidence to persuade.</persuasive>final_response",
            "Use \"persuasive\" for convincing arguments.",
        ),
        builtin(
            "empathetic",
            Communication,
            "<empathetic>Use sensitive, supportive phrasing.</empathetic>final_response",
            "Use \"empathetic\" for supportive communication.",
        ),
    ]
});

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtin_keywords_are_unique() {
        let mut seen = HashSet::new();
        for def in BUILT_IN_TRIGGERS.iter() {
            assert!(
                seen.insert(def.keyword.to_lowercase()),
                "duplicate keyword: {}",
                def.keyword
            );
        }
    }

    #[test]
    fn test_builtin_tags_are_unique_and_valid() {
        use crate::model::TagVocabulary;
        let mut seen = HashSet::new();
        for def in BUILT_IN_TRIGGERS.iter() {
            let tag = def.tag();
            assert!(TagVocabulary::is_valid_tag_name(&tag), "invalid tag: {tag}");
            assert!(seen.insert(tag.clone()), "colliding tag: {tag}");
        }
    }

    #[test]
    fn test_builtins_are_enabled_builtin_entries() {
        for def in BUILT_IN_TRIGGERS.iter() {
            assert!(def.enabled);
            assert!(!def.is_custom());
            assert!(def.example.is_some());
        }
    }
}
