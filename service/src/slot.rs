use std::sync::Arc;

/// Bookable slot labels of one day, in grid order. Each slot runs until
/// the next label starts; the last slot runs until [`CLOSING_TIME`].
pub const SLOT_LABELS: [&str; 17] = [
    "06:00", "07:00", "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00",
    "16:00", "17:00", "18:00", "19:00", "20:00", "21:00", "22:00",
];

/// End of the last bookable slot of the day.
pub const CLOSING_TIME: &str = "23:00";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub start_time: Arc<str>,
    pub end_time: Arc<str>,
}

impl TimeSlot {
    pub fn start_hour(&self) -> Option<u8> {
        start_hour(&self.start_time)
    }
}

/// The hour of a slot label, read the way the schedule grid compares
/// labels: everything before the first `:`. Unparseable labels yield
/// `None` instead of failing.
pub fn start_hour(label: &str) -> Option<u8> {
    label.split(':').next()?.parse().ok()
}

/// All slots of one day, in grid order.
pub fn catalog() -> impl Iterator<Item = TimeSlot> {
    SLOT_LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| TimeSlot {
            start_time: Arc::from(*label),
            end_time: Arc::from(end_label(index)),
        })
}

/// The catalog entry starting at `start_time`, or `None` for labels
/// outside the grid.
pub fn find_slot(start_time: &str) -> Option<TimeSlot> {
    SLOT_LABELS
        .iter()
        .position(|label| *label == start_time)
        .map(|index| TimeSlot {
            start_time: Arc::from(SLOT_LABELS[index]),
            end_time: Arc::from(end_label(index)),
        })
}

fn end_label(index: usize) -> &'static str {
    SLOT_LABELS.get(index + 1).copied().unwrap_or(CLOSING_TIME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_whole_day() {
        let slots: Vec<TimeSlot> = catalog().collect();
        assert_eq!(slots.len(), 17);
        assert_eq!(slots[0].start_time.as_ref(), "06:00");
        assert_eq!(slots[16].start_time.as_ref(), "22:00");
        assert_eq!(slots[16].end_time.as_ref(), CLOSING_TIME);
    }

    #[test]
    fn test_slots_are_contiguous() {
        let slots: Vec<TimeSlot> = catalog().collect();
        for window in slots.windows(2) {
            assert_eq!(window[0].end_time, window[1].start_time);
        }
    }

    #[test]
    fn test_start_hour() {
        assert_eq!(start_hour("06:00"), Some(6));
        assert_eq!(start_hour("22:00"), Some(22));
        assert_eq!(start_hour("garbage"), None);
        assert_eq!(start_hour(""), None);
    }

    #[test]
    fn test_find_slot() {
        let slot = find_slot("11:00").unwrap();
        assert_eq!(slot.end_time.as_ref(), "12:00");
        assert_eq!(slot.start_hour(), Some(11));
        assert!(find_slot("05:00").is_none());
        assert!(find_slot("23:00").is_none());
    }
}
