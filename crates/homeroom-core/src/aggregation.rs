use crate::aggregation::error::AggregationError;
use crate::wordcloud::word_frequencies;
use homeroom_db::student_profile;
use homeroom_db::submission::{answer, submission};
use homeroom_db::survey::{assignment, question, survey};
use homeroom_entity::submission::answer::Model as Answer;
use homeroom_model::results::{ChoiceCount, QuestionResult, QuestionSummary, SurveyResults, WordCloud};
use homeroom_model::survey::{Question, QuestionDetail};
use homeroom_model_tools::convert::TryFromDbModel;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use uuid::Uuid;

pub mod error;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 }
}

fn summarize_question(question: &Question, answers: &[&Answer], submitted: u64, max_words: usize) -> QuestionSummary {
    match &question.detail {
        QuestionDetail::ShortAnswer { .. } => {
            let responses: Vec<String> = answers.iter().filter_map(|answer| answer.text.clone()).collect();
            let answered = responses.len() as u64;
            QuestionSummary::Text {
                word_cloud: word_frequencies(&responses, max_words),
                responses,
                answered,
                skipped: submitted.saturating_sub(answered),
            }
        }
        detail => {
            let mut counts: HashMap<Uuid, u64> = HashMap::new();
            for choice_id in answers.iter().filter_map(|answer| answer.choice_id) {
                *counts.entry(choice_id).or_default() += 1;
            }
            let choices: Vec<ChoiceCount> = detail
                .choices()
                .iter()
                .map(|choice| ChoiceCount {
                    choice_id: choice.id,
                    label: choice.label.clone(),
                    value: choice.value,
                    count: counts.get(&choice.id).copied().unwrap_or_default(),
                    percentage: 0.0,
                })
                .collect();
            let answered: u64 = choices.iter().map(|choice| choice.count).sum();
            let mean = match detail {
                QuestionDetail::Likert { .. } if answered > 0 => {
                    let total: i64 = choices
                        .iter()
                        .map(|choice| i64::from(choice.value) * i64::try_from(choice.count).unwrap_or(i64::MAX))
                        .sum();
                    Some(round_to(total as f64 / answered as f64, 2))
                }
                _ => None,
            };
            QuestionSummary::Choice {
                choices: choices
                    .into_iter()
                    .map(|choice| ChoiceCount {
                        percentage: round_to(ratio(choice.count, answered) * 100.0, 1),
                        ..choice
                    })
                    .collect(),
                answered,
                skipped: submitted.saturating_sub(answered),
                mean,
            }
        }
    }
}

/// Per question summaries of `submitted` responses. `answers` holds the answers of exactly those responses.
#[must_use]
pub fn summarize(questions: &[Question], answers: &[Answer], submitted: u64, max_words: usize) -> Vec<QuestionResult> {
    let mut by_question: HashMap<Uuid, Vec<&Answer>> = HashMap::new();
    for answer in answers {
        by_question.entry(answer.question_id).or_default().push(answer);
    }

    questions
        .iter()
        .map(|question| {
            let answers = by_question.get(&question.id).map(Vec::as_slice).unwrap_or_default();
            QuestionResult {
                question_id: question.id,
                position: question.position,
                prompt: question.prompt.clone(),
                kind: question.detail.kind(),
                required: question.required,
                summary: summarize_question(question, answers, submitted, max_words),
            }
        })
        .collect()
}

async fn load_questions(conn: &DatabaseConnection, survey_id: Uuid) -> Result<Vec<Question>, AggregationError> {
    Ok(question::Query::load_for_survey(conn, survey_id)
        .await?
        .into_iter()
        .map(Question::try_from_db_model)
        .collect::<Result<Vec<_>, _>>()?)
}

/// Answers of the submitted responses, ordered by submission time.
async fn submitted_answers(
    conn: &DatabaseConnection,
    survey_id: Uuid,
    section_id: Option<Uuid>,
) -> Result<(u64, Vec<Answer>), AggregationError> {
    let submitted = submission::Query::list_submitted(conn, survey_id, section_id).await?;
    let order: HashMap<Uuid, usize> = submitted
        .iter()
        .enumerate()
        .map(|(index, submission)| (submission.id, index))
        .collect();
    let mut answers = answer::Query::load_for_submissions(conn, order.keys().copied().collect()).await?;
    answers.sort_by_key(|answer| order.get(&answer.submission_id).copied());
    Ok((submitted.len() as u64, answers))
}

/// Results of a survey over all its sections, or a single one.
pub async fn survey_results(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
    section_id: Option<Uuid>,
    max_words: usize,
) -> Result<SurveyResults, AggregationError> {
    let survey = survey::Query::find_owned(conn, owner_id, survey_id).await?;
    let questions = load_questions(conn, survey_id).await?;

    let mut section_ids = assignment::Query::section_ids_for_survey(conn, survey_id).await?;
    if let Some(section_id) = section_id {
        section_ids.retain(|id| *id == section_id);
    }
    let students = student_profile::Query::count_in_sections(conn, section_ids).await?;
    let counts = submission::Query::counts(conn, survey_id, section_id).await?;
    let (submitted, answers) = submitted_answers(conn, survey_id, section_id).await?;
    tracing::debug!(%survey_id, ?section_id, students, submitted, "computing survey results");

    Ok(SurveyResults {
        survey_id,
        title: survey.title,
        section_id,
        students,
        submitted: counts.submitted,
        drafts: counts.drafts,
        response_rate: round_to(ratio(counts.submitted, students), 3),
        questions: summarize(&questions, &answers, submitted, max_words),
    })
}

/// The word frequencies of one short answer question.
pub async fn question_word_cloud(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
    question_id: Uuid,
    section_id: Option<Uuid>,
    max_words: usize,
) -> Result<WordCloud, AggregationError> {
    survey::Query::find_owned(conn, owner_id, survey_id).await?;
    let question = load_questions(conn, survey_id)
        .await?
        .into_iter()
        .find(|question| question.id == question_id)
        .ok_or_else(|| AggregationError::NotFound("question not found".to_owned()))?;
    if !matches!(question.detail, QuestionDetail::ShortAnswer { .. }) {
        return Err(AggregationError::NotShortAnswer(question_id));
    }

    let (_, answers) = submitted_answers(conn, survey_id, section_id).await?;
    let texts: Vec<String> = answers
        .into_iter()
        .filter(|answer| answer.question_id == question_id)
        .filter_map(|answer| answer.text)
        .collect();
    Ok(WordCloud {
        question_id,
        responses: texts.len() as u64,
        words: word_frequencies(&texts, max_words),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeroom_model::survey::Choice;

    fn choices(labels: &[&str], first_value: i32) -> Vec<Choice> {
        labels
            .iter()
            .zip(first_value..)
            .map(|(label, value)| Choice {
                id: Uuid::new_v4(),
                label: (*label).to_owned(),
                value,
            })
            .collect()
    }

    fn question(position: i32, detail: QuestionDetail) -> Question {
        Question {
            id: Uuid::new_v4(),
            position,
            prompt: format!("Question {position}"),
            required: false,
            detail,
        }
    }

    fn choose(question: &Question, index: usize) -> Answer {
        Answer {
            id: Uuid::new_v4(),
            submission_id: Uuid::new_v4(),
            question_id: question.id,
            choice_id: Some(question.detail.choices()[index].id),
            text: None,
        }
    }

    fn write(question: &Question, text: &str) -> Answer {
        Answer {
            id: Uuid::new_v4(),
            submission_id: Uuid::new_v4(),
            question_id: question.id,
            choice_id: None,
            text: Some(text.to_owned()),
        }
    }

    #[test]
    fn test_choice_summary() {
        let mcq = question(
            0,
            QuestionDetail::MultipleChoice {
                shuffle_choices: false,
                choices: choices(&["Yes", "No", "Maybe"], 1),
            },
        );
        let answers = vec![choose(&mcq, 0), choose(&mcq, 0), choose(&mcq, 1)];
        let results = summarize(std::slice::from_ref(&mcq), &answers, 4, 10);

        let QuestionSummary::Choice {
            choices,
            answered,
            skipped,
            mean,
        } = &results[0].summary
        else {
            panic!("expected a choice summary");
        };
        assert_eq!((*answered, *skipped), (3, 1));
        assert_eq!(mean, &None);
        let rows: Vec<_> = choices.iter().map(|row| (row.label.as_str(), row.count, row.percentage)).collect();
        assert_eq!(rows, [("Yes", 2, 66.7), ("No", 1, 33.3), ("Maybe", 0, 0.0)]);
    }

    #[test]
    fn test_likert_mean() {
        let likert = question(
            0,
            QuestionDetail::Likert {
                scale_min: 1,
                scale_max: 3,
                min_label: "Low".to_owned(),
                max_label: "High".to_owned(),
                choices: choices(&["1", "2", "3"], 1),
            },
        );
        let answers = vec![choose(&likert, 0), choose(&likert, 2), choose(&likert, 2)];
        let QuestionSummary::Choice { mean, .. } = &summarize(std::slice::from_ref(&likert), &answers, 3, 10)[0].summary
        else {
            panic!("expected a choice summary");
        };
        assert_eq!(*mean, Some(2.33));

        let QuestionSummary::Choice { mean, skipped, .. } = &summarize(&[likert], &[], 2, 10)[0].summary else {
            panic!("expected a choice summary");
        };
        assert_eq!((*mean, *skipped), (None, 2));
    }

    #[test]
    fn test_text_summary() {
        let text = question(
            1,
            QuestionDetail::ShortAnswer {
                max_length: 100,
                placeholder: String::new(),
            },
        );
        let other = question(
            0,
            QuestionDetail::MultipleChoice {
                shuffle_choices: false,
                choices: choices(&["A", "B"], 1),
            },
        );
        let answers = vec![
            write(&text, "More group projects"),
            choose(&other, 1),
            write(&text, "group work and projects"),
        ];
        let results = summarize(&[other, text], &answers, 3, 10);
        assert_eq!(results[0].position, 0);
        let QuestionSummary::Text {
            responses,
            word_cloud,
            answered,
            skipped,
        } = &results[1].summary
        else {
            panic!("expected a text summary");
        };
        assert_eq!(responses, &["More group projects".to_owned(), "group work and projects".to_owned()]);
        assert_eq!((*answered, *skipped), (2, 1));
        assert_eq!(word_cloud[0].word, "group");
        assert_eq!(word_cloud[0].count, 2);
        assert_eq!(word_cloud[1].word, "projects");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(3, 0), 0.0);
        assert_eq!(round_to(ratio(2, 3), 3), 0.667);
    }
}
