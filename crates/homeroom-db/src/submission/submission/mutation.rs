use crate::error::Error;
use crate::submission::answer;
use crate::submission::answer::NewAnswer;
use crate::submission::submission::Query;
use crate::util::{FlattenTransactionResultExt, is_unique_violation, now};
use homeroom_entity::submission::submission::{ActiveModel as ActiveSubmission, Model as Submission};
use sea_orm::{ActiveModelTrait, ActiveValue, IntoActiveModel, TransactionTrait};
use std::error::Error as StdError;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Stores the student's answers for a survey, creating the submission on first save.
    /// With `submit` the submission is finalized and rejects every later write.
    pub async fn save_answers<C: TransactionTrait>(
        conn: &C,
        survey_id: Uuid,
        assignment_id: Uuid,
        student_id: Uuid,
        answers: Vec<NewAnswer>,
        submit: bool,
    ) -> Result<Submission, Error> {
        let res = match Self::save_once(conn, survey_id, assignment_id, student_id, answers.clone(), submit).await {
            // a concurrent first save created the submission, the second attempt finds it
            Err(Error::Db(error)) if is_unique_violation(&error) => {
                tracing::debug!(%survey_id, %student_id, "submission created concurrently, saving again");
                Self::save_once(conn, survey_id, assignment_id, student_id, answers, submit).await
            }
            res => res,
        };
        res.inspect_err(|error| {
            tracing::error!(error = error as &dyn StdError, %survey_id, %student_id, "failed to save submission");
        })
    }

    async fn save_once<C: TransactionTrait>(
        conn: &C,
        survey_id: Uuid,
        assignment_id: Uuid,
        student_id: Uuid,
        answers: Vec<NewAnswer>,
        submit: bool,
    ) -> Result<Submission, Error> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let timestamp = now();
                let submission = match Query::find_for_student(txn, survey_id, student_id).await? {
                    Some(existing) if existing.is_submitted => return Err(Error::AlreadySubmitted(existing.id)),
                    Some(existing) => existing,
                    None => {
                        ActiveSubmission {
                            id: ActiveValue::Set(Uuid::new_v4()),
                            survey_id: ActiveValue::Set(survey_id),
                            assignment_id: ActiveValue::Set(assignment_id),
                            student_id: ActiveValue::Set(student_id),
                            is_submitted: ActiveValue::Set(false),
                            submitted_at: ActiveValue::Set(None),
                            created_at: ActiveValue::Set(timestamp),
                            updated_at: ActiveValue::Set(timestamp),
                        }
                        .insert(txn)
                        .await?
                    }
                };
                let submission_id = submission.id;

                answer::Mutation::replace_answers(txn, submission_id, answers).await?;

                let mut active = submission.into_active_model();
                active.assignment_id = ActiveValue::Set(assignment_id);
                active.updated_at = ActiveValue::Set(timestamp);
                if submit {
                    active.is_submitted = ActiveValue::Set(true);
                    active.submitted_at = ActiveValue::Set(Some(timestamp));
                }
                let submission = active.update(txn).await?;
                tracing::debug!(%submission_id, %student_id, submit, "saved submission answers");
                Ok(submission)
            })
        })
        .await
        .flatten_res()
    }
}
