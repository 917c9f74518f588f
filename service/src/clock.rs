use mockall::automock;

/// Wall clock threaded as an explicit dependency so that date and hour
/// comparisons stay testable.
#[automock]
pub trait ClockService {
    fn time_now(&self) -> time::Time;
    fn date_now(&self) -> time::Date;
    fn date_time_now(&self) -> time::PrimitiveDateTime;
}
