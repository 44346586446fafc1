pub const TABLE: &str = "bmi_records";

pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS bmi_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    weight REAL NOT NULL,
    height REAL NOT NULL,
    bmi REAL NOT NULL,
    category TEXT NOT NULL,
    date TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

pub const INSERT_RECORD: &str = "INSERT INTO bmi_records (username, weight, height, bmi, category)
VALUES (?, ?, ?, ?, ?)
RETURNING id, username, weight, height, bmi, category, date";

pub const SELECT_BY_USERNAME: &str = "SELECT id, username, weight, height, bmi, category, date
FROM bmi_records
WHERE username = ?
ORDER BY id";
