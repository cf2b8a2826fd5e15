//! Per-employee grouping of leave records.

use std::collections::HashMap;

use crate::models::{LeaveRecord, UNKNOWN};

/// The records of one employee, in input order.
#[derive(Debug, Clone)]
pub struct EmployeeGroup<'a> {
    /// The employee the records belong to.
    pub employee_id: &'a str,
    /// The employee's records in the order they were supplied.
    pub records: Vec<&'a LeaveRecord>,
}

impl EmployeeGroup<'_> {
    /// The first resolved employee name in the group, or `"Unknown"`.
    pub fn employee_name(&self) -> String {
        self.records
            .iter()
            .find_map(|r| r.employee_name.as_deref())
            .unwrap_or(UNKNOWN)
            .to_string()
    }

    /// The first resolved department in the group, or `"Unknown"`.
    pub fn department(&self) -> String {
        self.records
            .iter()
            .find_map(|r| r.department.as_deref())
            .unwrap_or(UNKNOWN)
            .to_string()
    }

    /// Number of records in the group.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the group holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts records matching `predicate`.
    pub fn count_where<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&LeaveRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).count()
    }
}

/// Groups records by employee id.
///
/// Groups come out in order of each employee's first record, and records
/// inside a group keep their input order.
pub fn group_by_employee(records: &[LeaveRecord]) -> Vec<EmployeeGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<EmployeeGroup<'_>> = Vec::new();

    for record in records {
        let id = record.employee_id.as_str();
        let slot = *index.entry(id).or_insert_with(|| {
            groups.push(EmployeeGroup {
                employee_id: id,
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    groups
}
