use crate::{models, schema, Error, Store};
use diesel::prelude::*;
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, RunQueryDsl};
use itertools::Itertools;

impl Store {
    /// Stores a submission and its answers in one transaction.
    ///
    /// Each answer's `submission_id` is replaced with the id of the new
    /// submission; if any answer fails nothing is kept.
    #[tracing::instrument(skip(self, submission, answers), fields(answers = answers.len()))]
    pub async fn submit_form(
        &self,
        submission: models::NewSubmission,
        answers: Vec<models::NewFormAnswer>,
    ) -> Result<(models::Submission, Vec<models::FormAnswer>), Error> {
        self.connection()
            .await?
            .transaction(move |conn| {
                use schema::formdesk::{form_answers, submissions};
                async move {
                    let submission = diesel::insert_into(submissions::table)
                        .values(submission)
                        .returning(models::Submission::as_returning())
                        .get_result(conn)
                        .await?;
                    if answers.is_empty() {
                        return Ok((submission, Vec::new()));
                    }
                    let answers = answers
                        .into_iter()
                        .map(|answer| models::NewFormAnswer {
                            submission_id: Some(submission.id),
                            ..answer
                        })
                        .collect_vec();
                    let answers = diesel::insert_into(form_answers::table)
                        .values(answers)
                        .returning(models::FormAnswer::as_returning())
                        .get_results(conn)
                        .await?;
                    tracing::info!(submission_id = submission.id, "form submitted");
                    Ok::<_, Error>((submission, answers))
                }
                .scope_boxed()
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_submission_with_answers(
        &self,
        submission_id: i32,
    ) -> Result<(models::Submission, Vec<models::FormAnswer>), Error> {
        use schema::formdesk::{form_answers, submissions};
        let mut conn = self.connection().await?;
        let submission = submissions::table
            .find(submission_id)
            .select(models::Submission::as_select())
            .first(&mut conn)
            .await?;
        let answers = models::FormAnswer::belonging_to(&submission)
            .order(form_answers::id)
            .select(models::FormAnswer::as_select())
            .load(&mut conn)
            .await?;
        Ok((submission, answers))
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_submissions_by_service(
        &self,
        service_id: i32,
    ) -> Result<Vec<(models::Submission, Vec<models::FormAnswer>)>, Error> {
        use schema::formdesk::{form_answers, submissions};
        let mut conn = self.connection().await?;
        let submissions = submissions::table
            .filter(submissions::service_id.eq(service_id))
            .order(submissions::id)
            .select(models::Submission::as_select())
            .load(&mut conn)
            .await?;
        let answers = models::FormAnswer::belonging_to(&submissions)
            .order(form_answers::id)
            .select(models::FormAnswer::as_select())
            .load(&mut conn)
            .await?;
        Ok(answers
            .grouped_by(&submissions)
            .into_iter()
            .zip(submissions)
            .map(|(answers, submission)| (submission, answers))
            .collect())
    }
}
