use std::error::Error;

use bmi_app::{tui, Presenter};
use bmi_db::{Connection, RecordRepository, RecordRepositoryImpl};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    info!("Connecting to database");
    let conn = Connection::establish().await?;
    let record_repository = Box::new(RecordRepositoryImpl::new(conn.clone()));

    info!("Initializing schema");
    record_repository.initialize().await?;

    tui::run(Presenter::new(record_repository)).await?;
    Ok(())
}
