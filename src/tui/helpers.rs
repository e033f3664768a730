use crate::domain::gesture::NOMINAL_CARD_WIDTH;

/// Fraction of the deck already passed, in `[0, 1]`
pub fn calculate_progress(position: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (position.min(total)) as f64 / total as f64
}

/// Converts a horizontal drag measured in terminal columns into a displacement
/// on the nominal card scale.
pub fn columns_to_displacement(delta_columns: i32, card_width: u16) -> f64 {
    if card_width == 0 {
        return 0.0;
    }
    delta_columns as f64 * NOMINAL_CARD_WIDTH / card_width as f64
}

/// Inverse of [`columns_to_displacement`], clamped to `max_columns` either way.
pub fn displacement_to_columns(displacement: f64, card_width: u16, max_columns: u16) -> i32 {
    let columns = (displacement * card_width as f64 / NOMINAL_CARD_WIDTH).round() as i32;
    let max = max_columns as i32;
    columns.clamp(-max, max)
}

/// Splits skills into the ones shown and the count of hidden ones
pub fn visible_skills(skills: &[String], max: usize) -> (&[String], usize) {
    if skills.len() <= max {
        (skills, 0)
    } else {
        (&skills[..max], skills.len() - max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_progress() {
        assert_eq!(calculate_progress(0, 0), 0.0);
        assert_eq!(calculate_progress(1, 4), 0.25);
        assert_eq!(calculate_progress(9, 4), 1.0);
    }

    #[test]
    fn test_columns_to_displacement() {
        assert_eq!(columns_to_displacement(10, 50), 100.0);
        assert_eq!(columns_to_displacement(-25, 50), -250.0);
        assert_eq!(columns_to_displacement(5, 0), 0.0);
    }

    #[test]
    fn test_displacement_to_columns_clamps() {
        assert_eq!(displacement_to_columns(100.0, 50, 20), 10);
        assert_eq!(displacement_to_columns(1000.0, 50, 20), 20);
        assert_eq!(displacement_to_columns(-1000.0, 50, 20), -20);
    }

    #[test]
    fn test_visible_skills() {
        let skills: Vec<String> = (0..8).map(|i| format!("skill{}", i)).collect();

        let (shown, hidden) = visible_skills(&skills, 6);
        assert_eq!(shown.len(), 6);
        assert_eq!(hidden, 2);

        let (shown, hidden) = visible_skills(&skills[..3], 6);
        assert_eq!(shown.len(), 3);
        assert_eq!(hidden, 0);
    }
}
