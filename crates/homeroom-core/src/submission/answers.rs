use homeroom_db::submission::answer::NewAnswer;
use homeroom_model::submission::{AnswerRequest, AnswerValue};
use homeroom_model::survey::{Question, QuestionDetail};
use homeroom_model::validation::FieldErrors;
use std::collections::HashSet;
use uuid::Uuid;

fn key(question_id: Uuid) -> String {
    format!("answers[{question_id}]")
}

fn field(answer: &AnswerRequest) -> String {
    key(answer.question_id)
}

/// Checks the answers against the survey's questions. Blank text answers are dropped.
///
/// With `require_all` every required question must end up answered.
pub fn validate_answers(
    questions: &[Question],
    answers: Vec<AnswerRequest>,
    require_all: bool,
) -> Result<Vec<NewAnswer>, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut seen = HashSet::new();
    let mut valid = Vec::with_capacity(answers.len());

    for answer in answers {
        let Some(question) = questions.iter().find(|question| question.id == answer.question_id) else {
            errors.add(field(&answer), "Question does not belong to this survey.");
            continue;
        };
        if !seen.insert(answer.question_id) {
            errors.add(field(&answer), "Question was answered more than once.");
            continue;
        }

        match (&question.detail, &answer.value) {
            (QuestionDetail::ShortAnswer { max_length, .. }, AnswerValue::Text { text }) => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                if i64::try_from(text.chars().count()).unwrap_or(i64::MAX) > i64::from(*max_length) {
                    errors.add(
                        field(&answer),
                        format!("Ensure this answer has at most {max_length} characters."),
                    );
                    continue;
                }
                valid.push(NewAnswer {
                    question_id: question.id,
                    choice_id: None,
                    text: Some(text.to_owned()),
                });
            }
            (QuestionDetail::ShortAnswer { .. }, AnswerValue::Choice { .. }) => {
                errors.add(field(&answer), "This question expects a text answer.");
            }
            (detail, AnswerValue::Choice { choice_id }) => {
                if detail.choices().iter().any(|choice| choice.id == *choice_id) {
                    valid.push(NewAnswer {
                        question_id: question.id,
                        choice_id: Some(*choice_id),
                        text: None,
                    });
                } else {
                    errors.add(field(&answer), "Select a valid choice.");
                }
            }
            (_, AnswerValue::Text { .. }) => {
                errors.add(field(&answer), "This question expects a choice.");
            }
        }
    }

    if require_all {
        let answered: HashSet<_> = valid.iter().map(|answer| answer.question_id).collect();
        for question in questions.iter().filter(|question| question.required) {
            if !answered.contains(&question.id) && errors.get(&key(question.id)).is_none() {
                errors.add(key(question.id), "This question is required.");
            }
        }
    }

    errors.into_result()?;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeroom_model::survey::Choice;

    fn choice_question(required: bool) -> Question {
        Question {
            id: Uuid::new_v4(),
            position: 0,
            prompt: "Favourite subject?".to_owned(),
            required,
            detail: QuestionDetail::MultipleChoice {
                shuffle_choices: false,
                choices: ["Maths", "Art"]
                    .into_iter()
                    .zip(1..)
                    .map(|(label, value)| Choice {
                        id: Uuid::new_v4(),
                        label: label.to_owned(),
                        value,
                    })
                    .collect(),
            },
        }
    }

    fn text_question(required: bool) -> Question {
        Question {
            id: Uuid::new_v4(),
            position: 1,
            prompt: "Anything else?".to_owned(),
            required,
            detail: QuestionDetail::ShortAnswer {
                max_length: 10,
                placeholder: String::new(),
            },
        }
    }

    fn choose(question: &Question, index: usize) -> AnswerRequest {
        AnswerRequest {
            question_id: question.id,
            value: AnswerValue::Choice {
                choice_id: question.detail.choices()[index].id,
            },
        }
    }

    fn write(question: &Question, text: &str) -> AnswerRequest {
        AnswerRequest {
            question_id: question.id,
            value: AnswerValue::Text { text: text.to_owned() },
        }
    }

    #[test]
    fn test_valid_answers() {
        let questions = [choice_question(true), text_question(false)];
        let answers =
            validate_answers(&questions, vec![choose(&questions[0], 1), write(&questions[1], "  Cool  ")], true)
                .unwrap();
        assert_eq!(answers[0].choice_id, Some(questions[0].detail.choices()[1].id));
        assert_eq!(answers[1].text.as_deref(), Some("Cool"));
    }

    #[test]
    fn test_blank_text_is_no_answer() {
        let questions = [text_question(true)];
        assert!(validate_answers(&questions, vec![write(&questions[0], "   ")], false)
            .unwrap()
            .is_empty());

        let errors = validate_answers(&questions, vec![write(&questions[0], "   ")], true).unwrap_err();
        assert_eq!(
            errors.get(&key(questions[0].id)),
            Some(&["This question is required.".to_owned()][..])
        );
    }

    #[test]
    fn test_invalid_answers() {
        let questions = [choice_question(false), text_question(false)];
        let foreign = choice_question(false);
        let errors = validate_answers(
            &questions,
            vec![
                choose(&foreign, 0),
                AnswerRequest {
                    question_id: questions[0].id,
                    value: AnswerValue::Choice {
                        choice_id: foreign.detail.choices()[0].id,
                    },
                },
                write(&questions[1], "far too long for this"),
            ],
            false,
        )
        .unwrap_err();
        let get = |question: &Question| errors.get(&key(question.id)).map(<[String]>::to_vec);
        assert_eq!(get(&foreign), Some(vec!["Question does not belong to this survey.".to_owned()]));
        assert_eq!(get(&questions[0]), Some(vec!["Select a valid choice.".to_owned()]));
        assert_eq!(
            get(&questions[1]),
            Some(vec!["Ensure this answer has at most 10 characters.".to_owned()])
        );
    }

    #[test]
    fn test_kind_mismatch_and_duplicates() {
        let questions = [choice_question(false), text_question(false)];
        let errors = validate_answers(
            &questions,
            vec![
                write(&questions[0], "Maths"),
                choose(&questions[0], 0),
                choose(&questions[0], 1),
                AnswerRequest {
                    question_id: questions[1].id,
                    value: AnswerValue::Choice {
                        choice_id: questions[0].detail.choices()[0].id,
                    },
                },
            ],
            false,
        )
        .unwrap_err();
        assert_eq!(
            errors.get(&key(questions[0].id)),
            Some(
                &[
                    "This question expects a choice.".to_owned(),
                    "Question was answered more than once.".to_owned(),
                    "Question was answered more than once.".to_owned(),
                ][..]
            )
        );
        assert_eq!(
            errors.get(&key(questions[1].id)),
            Some(&["This question expects a text answer.".to_owned()][..])
        );
    }
}
