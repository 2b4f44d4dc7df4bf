//! Boss phase stat changes

use crate::types::Monster;

pub fn apply(m: Monster) -> Monster {
    if m.name == "Araxxor" && m.in_phase("Enraged") {
        let mut scaled = m;
        scaled.skills.def += 35;
        return scaled;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enraged_araxxor() {
        let mut m = Monster {
            id: 13668,
            name: "Araxxor".to_string(),
            ..Default::default()
        };
        m.skills.def = 100;
        assert_eq!(apply(m.clone()).skills.def, 100);
        m.inputs.phase = Some("Enraged".to_string());
        assert_eq!(apply(m).skills.def, 135);
    }
}
