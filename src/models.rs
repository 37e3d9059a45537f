//! Domain models for the employee table. These stay plain data holders so the
//! controller can focus on state transitions and the UI on presentation.

use std::fmt;

/// Offices an employee can be assigned to, in the order the form offers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Office {
    #[default]
    Tokyo,
    Singapore,
    London,
    NewYork,
    Edinburgh,
    SanFrancisco,
}

impl Office {
    /// Every office, in form order. The first entry is the form default.
    pub const ALL: [Office; 6] = [
        Office::Tokyo,
        Office::Singapore,
        Office::London,
        Office::NewYork,
        Office::Edinburgh,
        Office::SanFrancisco,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Office::Tokyo => "Tokyo",
            Office::Singapore => "Singapore",
            Office::London => "London",
            Office::NewYork => "New York",
            Office::Edinburgh => "Edinburgh",
            Office::SanFrancisco => "San Francisco",
        }
    }

    /// The option after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The option before this one, wrapping around.
    pub fn previous(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|office| *office == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated employee record, ready to become a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
    pub position: String,
    pub office: Office,
    pub age: i64,
    /// Whole currency units; rendered with [`format_salary`].
    pub salary: i64,
}

impl Employee {
    /// Cell texts in column order: name, position, office, age, salary.
    pub fn cells(&self) -> [String; 5] {
        [
            self.name.clone(),
            self.position.clone(),
            self.office.label().to_string(),
            self.age.to_string(),
            format_salary(self.salary),
        ]
    }
}

/// Render a salary as `$` followed by the amount with comma thousands
/// separators.
pub fn format_salary(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("$-{grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Rows the table shows on start-up.
pub fn seed_employees() -> Vec<Employee> {
    let seed = [
        ("Airi Satou", "Accountant", Office::Tokyo, 33, 162_700),
        ("Angelica Ramos", "Chief Executive Officer (CEO)", Office::London, 47, 1_200_000),
        ("Ashton Cox", "Junior Technical Author", Office::SanFrancisco, 66, 86_000),
        ("Bradley Greer", "Software Engineer", Office::London, 41, 132_000),
        ("Brenden Wagner", "Software Engineer", Office::SanFrancisco, 28, 206_850),
        ("Brielle Williamson", "Integration Specialist", Office::NewYork, 61, 372_000),
        ("Bruno Nash", "Software Engineer", Office::London, 38, 163_500),
        ("Caesar Vance", "Pre-Sales Support", Office::NewYork, 21, 106_450),
        ("Cara Stevens", "Sales Assistant", Office::NewYork, 46, 145_600),
        ("Cedric Kelly", "Senior Javascript Developer", Office::Edinburgh, 22, 433_060),
        ("Colleen Hurst", "Javascript Developer", Office::SanFrancisco, 39, 205_500),
        ("Dai Rios", "Personnel Lead", Office::Edinburgh, 35, 217_500),
        ("Donna Snider", "Customer Support", Office::NewYork, 27, 112_000),
        ("Doris Wilder", "Sales Assistant", Office::Singapore, 23, 85_600),
    ];

    seed.into_iter()
        .map(|(name, position, office, age, salary)| Employee {
            name: name.to_string(),
            position: position.to_string(),
            office,
            age,
            salary,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_uses_thousands_separators() {
        assert_eq!(format_salary(50_000), "$50,000");
        assert_eq!(format_salary(1_200_000), "$1,200,000");
        assert_eq!(format_salary(999), "$999");
        assert_eq!(format_salary(0), "$0");
        assert_eq!(format_salary(-1_234), "$-1,234");
    }

    #[test]
    fn office_cycles_in_form_order() {
        assert_eq!(Office::default(), Office::Tokyo);
        assert_eq!(Office::Tokyo.next(), Office::Singapore);
        assert_eq!(Office::SanFrancisco.next(), Office::Tokyo);
        assert_eq!(Office::Tokyo.previous(), Office::SanFrancisco);
        assert_eq!(Office::NewYork.to_string(), "New York");
    }

    #[test]
    fn cells_follow_column_order() {
        let employee = Employee {
            name: "Bobby Tables".into(),
            position: "DBA".into(),
            office: Office::London,
            age: 30,
            salary: 50_000,
        };
        assert_eq!(
            employee.cells(),
            ["Bobby Tables", "DBA", "London", "30", "$50,000"].map(String::from)
        );
    }
}
