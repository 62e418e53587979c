use homeroom_db::survey::question::{NewChoice, NewQuestion, NewQuestionDetail};
use homeroom_model::survey::{QuestionDraft, QuestionDraftDetail, SurveyDraft};
use homeroom_model::validation::FieldErrors;
use std::collections::HashSet;

pub const DEFAULT_MAX_LENGTH: i32 = 1000;
pub const MAX_TEXT_LENGTH: i32 = 5000;
pub const MAX_LIKERT_POINTS: i64 = 10;

/// A survey draft that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub description: String,
    pub questions: Option<Vec<NewQuestion>>,
}

/// Checks the draft and turns it into storable questions. Likert choices are generated from the scale.
///
/// `require_questions` is set for surveys that already left the draft state.
pub fn validate_draft(draft: SurveyDraft, require_questions: bool) -> Result<ValidDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let title = draft.title.trim().to_owned();
    if title.is_empty() {
        errors.add("title", "Title is required.");
    }

    let questions = draft.questions.map(|questions| {
        if require_questions && questions.is_empty() {
            errors.add("questions", "Add at least one question.");
        }
        questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| validate_question(&mut errors, index, question))
            .collect::<Vec<_>>()
    });

    errors.into_result()?;
    Ok(ValidDraft {
        title,
        description: draft.description.trim().to_owned(),
        questions,
    })
}

fn validate_question(errors: &mut FieldErrors, index: usize, question: QuestionDraft) -> NewQuestion {
    let field = |name: &str| format!("questions[{index}].{name}");
    let prompt = question.prompt.trim().to_owned();
    if prompt.is_empty() {
        errors.add(field("prompt"), "Question text is required.");
    }

    let detail = match question.detail {
        QuestionDraftDetail::MultipleChoice {
            shuffle_choices,
            choices,
        } => {
            let labels: Vec<String> = choices
                .iter()
                .map(|choice| choice.trim().to_owned())
                .filter(|choice| !choice.is_empty())
                .collect();
            let distinct: HashSet<&str> = labels.iter().map(String::as_str).collect();
            if labels.len() < 2 {
                errors.add(field("choices"), "Add at least two choices.");
            } else if distinct.len() != labels.len() {
                errors.add(field("choices"), "Choices must be distinct.");
            }
            NewQuestionDetail::MultipleChoice {
                shuffle_choices,
                choices: (1..)
                    .zip(labels)
                    .map(|(value, label)| NewChoice { label, value })
                    .collect(),
            }
        }
        QuestionDraftDetail::Likert {
            scale_min,
            scale_max,
            min_label,
            max_label,
            labels,
        } => {
            let points = i64::from(scale_max) - i64::from(scale_min) + 1;
            if scale_min >= scale_max {
                errors.add(field("scale_max"), "The scale maximum must be greater than the minimum.");
            } else if points > MAX_LIKERT_POINTS {
                errors.add(field("scale_max"), "A scale can have at most 10 points.");
            }
            let choices = if points > 1 && points <= MAX_LIKERT_POINTS {
                likert_choices(scale_min, scale_max, &labels)
            } else {
                vec![]
            };
            NewQuestionDetail::Likert {
                scale_min,
                scale_max,
                min_label: min_label.trim().to_owned(),
                max_label: max_label.trim().to_owned(),
                choices,
            }
        }
        QuestionDraftDetail::ShortAnswer {
            max_length,
            placeholder,
        } => {
            let max_length = max_length.unwrap_or(DEFAULT_MAX_LENGTH);
            if !(1..=MAX_TEXT_LENGTH).contains(&max_length) {
                errors.add(field("max_length"), "Maximum length must be between 1 and 5000.");
            }
            NewQuestionDetail::ShortAnswer {
                max_length,
                placeholder: placeholder.trim().to_owned(),
            }
        }
    };

    NewQuestion {
        prompt,
        required: question.required,
        detail,
    }
}

fn likert_choices(scale_min: i32, scale_max: i32, labels: &[String]) -> Vec<NewChoice> {
    (scale_min..=scale_max)
        .enumerate()
        .map(|(index, value)| {
            let label = labels
                .get(index)
                .map(|label| label.trim())
                .filter(|label| !label.is_empty())
                .map_or_else(|| value.to_string(), ToOwned::to_owned);
            NewChoice { label, value }
        })
        .collect()
}
