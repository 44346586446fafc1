use bmi_db::RecordRepository;
use bmi_model::{classify, validate_username, BmiRecord, Classification, Measurement, NewRecord};
use chrono::NaiveDateTime;
use log::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum PresenterError {
    #[error(transparent)]
    Invalid(#[from] bmi_model::ValidationError),
    #[error(transparent)]
    Store(#[from] bmi_db::Error),
}

type Result<T> = std::result::Result<T, PresenterError>;

/// Raw contents of the input form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Form {
    pub username: String,
    pub weight: String,
    pub height: String,
}

/// What the form currently shows besides its inputs.
#[derive(Debug, Default)]
pub struct Session {
    username: Option<String>,
    result: Option<String>,
    history: Vec<BmiRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// User whose history is displayed.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Result line of the last successful calculation.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn history(&self) -> &[BmiRecord] {
        &self.history
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trend {
    pub title: String,
    /// BMI values in time order.
    pub points: Vec<(NaiveDateTime, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrendView {
    Empty,
    Chart(Trend),
}

pub fn result_line(classification: &Classification) -> String {
    format!(
        "BMI: {} ({})",
        format_number(classification.bmi),
        classification.category
    )
}

/// Shortest text that reads back as `x`, keeping at least one decimal digit.
pub fn format_number(x: f64) -> String {
    let text = x.to_string();
    if x.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

pub struct Presenter {
    repository: Box<dyn RecordRepository>,
}

impl Presenter {
    pub fn new(repository: Box<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    /// Validates the form, stores a new record and reloads the history.
    /// Nothing is stored if any input is invalid.
    pub async fn calculate(&self, session: &mut Session, form: &Form) -> Result<Classification> {
        let (username, measurement) = match validate_form(form) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Rejected input: {}", e);
                return Err(e.into());
            }
        };

        let classification = classify(measurement.weight(), measurement.height());
        debug!("Classified {:?} as {:?}", measurement, classification);

        let record = NewRecord::new(username, measurement, classification);
        let stored = self.repository.append(record).await.map_err(|e| {
            error!("Failed to store record: {}", e);
            e
        })?;
        info!("Stored record {} for {}", stored.id, stored.username);

        session.result = Some(result_line(&classification));
        self.refresh_history(session, username).await?;
        Ok(classification)
    }

    /// Replaces the displayed history with the records of `username`.
    /// An empty username leaves the session untouched.
    pub async fn refresh_history(&self, session: &mut Session, username: &str) -> Result<()> {
        let Ok(username) = validate_username(username) else {
            return Ok(());
        };

        let history = self.repository.query_by_user(username).await.map_err(|e| {
            error!("Failed to load history for {}: {}", username, e);
            e
        })?;
        debug!("Loaded {} records for {}", history.len(), username);

        session.username = Some(username.to_owned());
        session.history = history;
        Ok(())
    }

    pub async fn trend(&self, username: &str) -> Result<TrendView> {
        let username = validate_username(username)?;
        let records = self.repository.query_by_user(username).await.map_err(|e| {
            error!("Failed to load history for {}: {}", username, e);
            e
        })?;

        if records.is_empty() {
            info!("No records to plot for {}", username);
            return Ok(TrendView::Empty);
        }

        let mut points: Vec<_> = records.iter().map(|r| (r.date, r.bmi)).collect();
        points.sort_by_key(|(date, _)| *date);

        Ok(TrendView::Chart(Trend {
            title: format!("BMI Trend for {}", username),
            points,
        }))
    }
}

fn validate_form(
    form: &Form,
) -> std::result::Result<(&str, Measurement), bmi_model::ValidationError> {
    let username = validate_username(&form.username)?;
    let measurement = Measurement::parse(&form.weight, &form.height)?;
    Ok((username, measurement))
}
