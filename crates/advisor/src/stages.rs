//! The local resolution pipeline as an ordered list of stages.
//!
//! Each stage pairs a predicate with a handler. The first stage whose
//! predicate holds and whose handler produces text answers the question, so
//! precedence is the order of [`LOCAL_STAGES`].

use crate::answer::{Answer, AnswerSource};
use crate::query::Query;
use crate::render::render_rules;
use crate::rules;
use crate::timeframe;
use nivesh_knowledge::{KnowledgeBase, RuleId};

/// One (predicate, handler) pair.
pub struct Stage {
    pub name: &'static str,
    pub source: AnswerSource,
    pub applies: fn(&Query) -> bool,
    pub answer: fn(&Query, &KnowledgeBase) -> Option<String>,
}

impl Stage {
    pub fn run(&self, query: &Query, knowledge: &KnowledgeBase) -> Option<Answer> {
        if !(self.applies)(query) {
            return None;
        }
        (self.answer)(query, knowledge).map(|text| Answer::new(text, self.source))
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish()
    }
}

/// Glossary short-circuit, always consulted first.
pub const GLOSSARY_STAGE: Stage = Stage {
    name: "glossary",
    source: AnswerSource::Glossary,
    applies: always,
    answer: glossary_answer,
};

/// Stages after the glossary, in precedence order.
pub const LOCAL_STAGES: [Stage; 6] = [
    Stage {
        name: "dataset",
        source: AnswerSource::Dataset,
        applies: always,
        answer: dataset_answer,
    },
    Stage {
        name: "rules",
        source: AnswerSource::Rules,
        applies: rules::is_rule_question,
        answer: rules_answer,
    },
    Stage {
        name: "vehicle-purchase",
        source: AnswerSource::Rules,
        applies: rules::is_vehicle_purchase,
        answer: vehicle_answer,
    },
    Stage {
        name: "budget",
        source: AnswerSource::Rules,
        applies: rules::is_budget_question,
        answer: budget_answer,
    },
    Stage {
        name: "double-return",
        source: AnswerSource::Rules,
        applies: rules::is_growth_question,
        answer: growth_answer,
    },
    Stage {
        name: "timeframe",
        source: AnswerSource::Timeframe,
        applies: timeframe::applies,
        answer: timeframe_answer,
    },
];

/// First answer produced by `stages`, in order.
pub fn run_stages(stages: &[Stage], query: &Query, knowledge: &KnowledgeBase) -> Option<Answer> {
    stages.iter().find_map(|stage| {
        let answer = stage.run(query, knowledge)?;
        tracing::debug!("Answered by stage {}", stage.name);
        Some(answer)
    })
}

fn always(_: &Query) -> bool {
    true
}

fn glossary_answer(query: &Query, kb: &KnowledgeBase) -> Option<String> {
    kb.glossary
        .lookup(query.raw())
        .map(|term| term.definition.clone())
}

fn dataset_answer(query: &Query, kb: &KnowledgeBase) -> Option<String> {
    let found = kb.dataset.best_match(query.raw())?;
    tracing::debug!("Dataset match scored {:.2}", found.score);
    Some(found.entry.answer.clone())
}

fn rules_answer(query: &Query, kb: &KnowledgeBase) -> Option<String> {
    non_empty(render_rules(rules::classify(query, &kb.rules)))
}

fn vehicle_answer(_: &Query, kb: &KnowledgeBase) -> Option<String> {
    render_ids(kb, &[RuleId::TWENTY_FOUR_TEN])
}

fn budget_answer(_: &Query, kb: &KnowledgeBase) -> Option<String> {
    render_ids(kb, &[RuleId::FIFTY_THIRTY_TWENTY])
}

fn growth_answer(_: &Query, kb: &KnowledgeBase) -> Option<String> {
    render_ids(kb, &[RuleId::RULE_OF_72, RuleId::RULE_OF_114])
}

fn timeframe_answer(query: &Query, _: &KnowledgeBase) -> Option<String> {
    timeframe::recommend(query).map(str::to_string)
}

fn render_ids(kb: &KnowledgeBase, ids: &[RuleId]) -> Option<String> {
    non_empty(render_rules(rules::select(&kb.rules, ids)))
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}
