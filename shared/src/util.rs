/// Current calendar year in local time
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}
