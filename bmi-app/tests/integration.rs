use bmi_app::{tui::App, Form, Presenter, PresenterError, Session, Trend, TrendView};
use bmi_db::{Connection, MockRecordRepository, RecordRepository, RecordRepositoryImpl};
use bmi_model::{BmiRecord, Category, NewRecord, ValidationError};
use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockall::predicate::eq;
use ratatui::{backend::TestBackend, Terminal};

fn date(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn stored(id: i64, record: NewRecord, date: NaiveDateTime) -> BmiRecord {
    BmiRecord {
        id,
        username: record.username,
        weight: record.weight,
        height: record.height,
        bmi: record.bmi,
        category: record.category,
        date,
    }
}

fn form(username: &str, weight: &str, height: &str) -> Form {
    Form {
        username: username.to_owned(),
        weight: weight.to_owned(),
        height: height.to_owned(),
    }
}

async fn sqlite_presenter() -> Presenter {
    let connection = Connection::connect("sqlite::memory:").await.unwrap();
    let repository = RecordRepositoryImpl::new(connection);
    repository.initialize().await.unwrap();
    Presenter::new(Box::new(repository))
}

#[tokio::test]
async fn calculate_stores_record_and_reloads_history() {
    let expected = NewRecord {
        username: "alice".to_owned(),
        weight: 70.0,
        height: 1.75,
        bmi: 22.86,
        category: Category::NormalWeight,
    };
    let record = stored(1, expected.clone(), date(1, 8));
    let history = vec![record.clone()];

    let mut repository = MockRecordRepository::new();
    repository
        .expect_append()
        .with(eq(expected))
        .times(1)
        .returning(move |_| Ok(record.clone()));
    repository
        .expect_query_by_user()
        .with(eq("alice"))
        .times(1)
        .returning(move |_| Ok(history.clone()));

    let presenter = Presenter::new(Box::new(repository));
    let mut session = Session::new();

    let classification = presenter
        .calculate(&mut session, &form("alice", "70", "1.75"))
        .await
        .unwrap();

    assert_eq!(classification.bmi, 22.86);
    assert_eq!(classification.category, Category::NormalWeight);
    assert_eq!(session.result(), Some("BMI: 22.86 (Normal weight)"));
    assert_eq!(session.username(), Some("alice"));
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn invalid_input_is_never_stored() {
    let test_data = [
        (
            form("alice", "abc", "1.75"),
            ValidationError::NotANumber {
                field: bmi_model::Field::Weight,
                value: "abc".to_owned(),
            },
        ),
        (form("alice", "70", "-5"), ValidationError::NotPositive),
        (form("", "70", "1.75"), ValidationError::EmptyUsername),
    ];

    for (i, (form, expected_error)) in test_data.into_iter().enumerate() {
        let mut repository = MockRecordRepository::new();
        repository.expect_append().never();
        repository.expect_query_by_user().never();

        let presenter = Presenter::new(Box::new(repository));
        let mut session = Session::new();

        match presenter.calculate(&mut session, &form).await {
            Err(PresenterError::Invalid(e)) => assert_eq!(e, expected_error, "Test case #{}", i),
            other => panic!("Test case #{}: unexpected result {:?}", i, other),
        }
        assert_eq!(session.result(), None, "Test case #{}", i);
    }
}

#[tokio::test]
async fn storage_failure_is_reported() {
    let mut repository = MockRecordRepository::new();
    repository
        .expect_append()
        .returning(|_| {
            Err(bmi_db::Error::CorruptRecord {
                id: 1,
                reason: "disk full".to_owned(),
            })
        });
    repository.expect_query_by_user().never();

    let presenter = Presenter::new(Box::new(repository));
    let mut session = Session::new();

    let result = presenter
        .calculate(&mut session, &form("alice", "70", "1.75"))
        .await;

    assert!(matches!(result, Err(PresenterError::Store(_))));
    assert_eq!(session.result(), None);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn refresh_history_ignores_empty_username() {
    let mut repository = MockRecordRepository::new();
    repository.expect_query_by_user().never();

    let presenter = Presenter::new(Box::new(repository));
    let mut session = Session::new();

    presenter.refresh_history(&mut session, "  ").await.unwrap();

    assert_eq!(session.username(), None);
}

#[tokio::test]
async fn trend_without_records_is_empty() {
    let mut repository = MockRecordRepository::new();
    repository
        .expect_query_by_user()
        .with(eq("bob"))
        .returning(|_| Ok(vec![]));

    let presenter = Presenter::new(Box::new(repository));

    assert_eq!(presenter.trend("bob").await.unwrap(), TrendView::Empty);
}

#[tokio::test]
async fn trend_requires_username() {
    let mut repository = MockRecordRepository::new();
    repository.expect_query_by_user().never();

    let presenter = Presenter::new(Box::new(repository));

    assert!(matches!(
        presenter.trend("").await,
        Err(PresenterError::Invalid(ValidationError::EmptyUsername))
    ));
}

#[tokio::test]
async fn trend_points_are_time_ordered() {
    let record = |id, bmi, date| {
        stored(
            id,
            NewRecord {
                username: "alice".to_owned(),
                weight: 70.0,
                height: 1.75,
                bmi,
                category: Category::from_bmi(bmi),
            },
            date,
        )
    };
    let history = vec![
        record(1, 22.86, date(2, 8)),
        record(2, 23.51, date(1, 8)),
        record(3, 24.1, date(3, 8)),
    ];

    let mut repository = MockRecordRepository::new();
    repository
        .expect_query_by_user()
        .with(eq("alice"))
        .returning(move |_| Ok(history.clone()));

    let presenter = Presenter::new(Box::new(repository));

    assert_eq!(
        presenter.trend("alice").await.unwrap(),
        TrendView::Chart(Trend {
            title: "BMI Trend for alice".to_owned(),
            points: vec![(date(1, 8), 23.51), (date(2, 8), 22.86), (date(3, 8), 24.1)],
        })
    );
}

#[tokio::test]
async fn scenarios_against_sqlite() {
    let presenter = sqlite_presenter().await;
    let mut session = Session::new();

    let test_data = [
        (("70", "1.75"), 22.86, Category::NormalWeight),
        (("50", "1.6"), 19.53, Category::NormalWeight),
        (("90", "1.7"), 31.14, Category::Obesity),
    ];

    for (i, ((weight, height), bmi, category)) in test_data.into_iter().enumerate() {
        let classification = presenter
            .calculate(&mut session, &form("carol", weight, height))
            .await
            .unwrap();

        assert_eq!(classification.bmi, bmi, "Test case #{}", i);
        assert_eq!(classification.category, category, "Test case #{}", i);

        let last = session.history().last().unwrap();
        assert_eq!(last.bmi, bmi, "Test case #{}", i);
        assert_eq!(last.category, category, "Test case #{}", i);
        assert_eq!(session.history().len(), i + 1, "Test case #{}", i);
    }

    match presenter.trend("carol").await.unwrap() {
        TrendView::Chart(trend) => assert_eq!(
            trend.points.iter().map(|(_, bmi)| *bmi).collect::<Vec<_>>(),
            vec![22.86, 19.53, 31.14]
        ),
        TrendView::Empty => panic!("expected a chart"),
    }
    assert_eq!(presenter.trend("dave").await.unwrap(), TrendView::Empty);
}

#[tokio::test]
async fn whole_number_bmi_keeps_decimal_point() {
    let presenter = sqlite_presenter().await;
    let mut session = Session::new();

    presenter
        .calculate(&mut session, &form("erin", "72", "1.2"))
        .await
        .unwrap();

    assert_eq!(session.result(), Some("BMI: 50.0 (Obesity)"));
}

#[tokio::test]
async fn half_hundredth_bmi_rounds_to_even() {
    let presenter = sqlite_presenter().await;
    let mut session = Session::new();

    let classification = presenter
        .calculate(&mut session, &form("frank", "90.5", "2"))
        .await
        .unwrap();

    assert_eq!(classification.bmi, 22.62);
    assert_eq!(session.result(), Some("BMI: 22.62 (Normal weight)"));
    assert_eq!(session.history()[0].bmi, 22.62);
}

#[tokio::test]
async fn username_is_stored_as_typed() {
    let presenter = sqlite_presenter().await;
    let mut session = Session::new();

    presenter
        .calculate(&mut session, &form(" alice ", "70", "1.75"))
        .await
        .unwrap();
    presenter
        .calculate(&mut session, &form("alice", "80", "1.75"))
        .await
        .unwrap();

    assert_eq!(session.username(), Some("alice"));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].weight, 80.0);

    presenter
        .refresh_history(&mut session, " alice ")
        .await
        .unwrap();
    assert_eq!(session.username(), Some(" alice "));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].username, " alice ");
    assert_eq!(session.history()[0].weight, 70.0);
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c))).await;
    }
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test]
async fn form_calculates_and_renders_history() {
    let mut app = App::new(sqlite_presenter().await);

    type_text(&mut app, "alice").await;
    app.handle_key(key(KeyCode::Tab)).await;
    type_text(&mut app, "70").await;
    app.handle_key(key(KeyCode::Tab)).await;
    type_text(&mut app, "1.75").await;
    app.handle_key(key(KeyCode::Enter)).await;

    assert_eq!(app.message(), None);
    assert_eq!(app.session().result(), Some("BMI: 22.86 (Normal weight)"));
    assert_eq!(app.session().history().len(), 1);

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| bmi_app::tui::ui::draw(f, &app)).unwrap();
    let screen = screen(&terminal);

    assert!(screen.contains("BMI History"));
    assert!(screen.contains("Normal weight"));
    assert!(screen.contains("22.86"));
    assert!(screen.contains("70.0"));

    app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL))
        .await;
    assert_eq!(app.trend().map(|t| t.points.len()), Some(1));
    terminal.draw(|f| bmi_app::tui::ui::draw(f, &app)).unwrap();
    assert!(screen_contains(&terminal, "BMI Trend for alice"));

    app.handle_key(key(KeyCode::Esc)).await;
    assert_eq!(app.trend(), None);
    assert!(app.is_running());

    app.handle_key(key(KeyCode::Esc)).await;
    assert!(!app.is_running());
}

fn screen_contains(terminal: &Terminal<TestBackend>, text: &str) -> bool {
    screen(terminal).contains(text)
}

#[tokio::test]
async fn form_reports_invalid_input() {
    let mut app = App::new(sqlite_presenter().await);

    type_text(&mut app, "alice").await;
    app.handle_key(key(KeyCode::Down)).await;
    type_text(&mut app, "abc").await;
    app.handle_key(key(KeyCode::Down)).await;
    type_text(&mut app, "1.75").await;
    app.handle_key(key(KeyCode::Enter)).await;

    let message = app.message().unwrap();
    assert_eq!(message.title, "Invalid Input");
    assert!(app.session().history().is_empty());

    // any key dismisses the message without editing the form
    app.handle_key(key(KeyCode::Char('x'))).await;
    assert_eq!(app.message(), None);
    assert_eq!(app.form().height, "1.75");
}

#[tokio::test]
async fn form_reports_missing_trend_data() {
    let mut app = App::new(sqlite_presenter().await);

    app.handle_key(key(KeyCode::F(2))).await;
    assert_eq!(
        app.message().map(|m| m.text.as_str()),
        Some("Please enter a username to view trends.")
    );
    app.handle_key(key(KeyCode::Enter)).await;

    type_text(&mut app, "bob").await;
    app.handle_key(key(KeyCode::F(2))).await;
    let message = app.message().unwrap();
    assert_eq!(message.title, "No Data");
    assert_eq!(message.text, "No records found for the user.");
    assert_eq!(app.trend(), None);
}
