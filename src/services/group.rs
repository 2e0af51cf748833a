//! Group service
//!
//! Business logic for expense-sharing groups: group lifecycle, membership,
//! shared expenses, balances and the share text.

use crate::audit::EntityType;
use crate::error::{FinVaultError, FinVaultResult};
use crate::export::share;
use crate::models::{
    parse_amount, Group, GroupExpense, GroupExpenseId, GroupId, Member, MemberId,
};
use crate::storage::Storage;

use super::balance::{compute_balances, MemberBalance};

/// Service for group management
pub struct GroupService<'a> {
    storage: &'a Storage,
}

impl<'a> GroupService<'a> {
    /// Create a new group service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a group with no members or expenses
    pub fn create_group(&self, name: &str, avatar: Option<String>) -> FinVaultResult<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinVaultError::Validation("Group name cannot be empty".into()));
        }

        let group = Group::new(name, avatar);
        group
            .validate()
            .map_err(|e| FinVaultError::Validation(e.to_string()))?;

        self.storage.groups.push(group.clone())?;

        self.storage.log_create(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;

        Ok(group)
    }

    /// Replace a group's name and avatar
    pub fn rename_group(
        &self,
        id: GroupId,
        name: &str,
        avatar: Option<String>,
    ) -> FinVaultResult<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinVaultError::Validation("Group name cannot be empty".into()));
        }

        let before = self.require(id)?;
        let mut group = before.clone();
        group.rename(name, avatar);

        self.store(&before, &group)?;
        Ok(group)
    }

    /// Delete a group together with its expenses
    pub fn delete_group(&self, id: GroupId) -> FinVaultResult<Group> {
        let group = self
            .storage
            .groups
            .remove(id)?
            .ok_or_else(|| FinVaultError::group_not_found(id.to_string()))?;

        self.storage.log_delete(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;

        Ok(group)
    }

    /// Add a member; names are not deduplicated
    pub fn add_member(&self, group_id: GroupId, name: &str) -> FinVaultResult<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinVaultError::Validation("Member name cannot be empty".into()));
        }

        let before = self.require(group_id)?;
        let mut group = before.clone();
        let member_id = group.push_member(name);
        let member = Member {
            id: member_id,
            name: name.to_string(),
        };

        self.persist(&group)?;
        self.storage.log_create(
            EntityType::Member,
            member.id.to_string(),
            Some(format!("{} in {}", member.name, group.name)),
            &member,
        )?;

        Ok(member)
    }

    /// Remove a member who has not paid for anything in the group
    pub fn remove_member(&self, group_id: GroupId, member_id: MemberId) -> FinVaultResult<Member> {
        let before = self.require(group_id)?;
        let member = before
            .member(member_id)
            .cloned()
            .ok_or_else(|| FinVaultError::member_not_found(member_id.to_string()))?;

        if before.has_paid(member_id) {
            return Err(FinVaultError::Validation(format!(
                "{} paid for expenses in '{}'; remove those expenses first",
                member.name, before.name
            )));
        }

        let mut group = before.clone();
        group.members.retain(|m| m.id != member_id);
        group.updated_at = chrono::Utc::now();

        self.persist(&group)?;
        self.storage.log_delete(
            EntityType::Member,
            member.id.to_string(),
            Some(format!("{} in {}", member.name, group.name)),
            &member,
        )?;

        Ok(member)
    }

    /// Record a shared expense
    ///
    /// `amount` is the text as entered; it must parse to a positive number.
    /// The payer must be a member of the group.
    pub fn add_expense(
        &self,
        group_id: GroupId,
        description: &str,
        amount: &str,
        paid_by: MemberId,
    ) -> FinVaultResult<GroupExpense> {
        let description = description.trim();
        if description.is_empty() {
            return Err(FinVaultError::Validation(
                "Expense description cannot be empty".into(),
            ));
        }

        let amount = parse_amount(amount).map_err(|e| FinVaultError::Validation(e.to_string()))?;

        let before = self.require(group_id)?;
        let expense = GroupExpense::new(description, amount, paid_by);
        expense
            .validate()
            .map_err(|e| FinVaultError::Validation(e.to_string()))?;

        let mut group = before.clone();
        group
            .push_expense(expense.clone())
            .map_err(|e| FinVaultError::Validation(e.to_string()))?;

        self.persist(&group)?;
        self.storage.log_create(
            EntityType::GroupExpense,
            expense.id.to_string(),
            Some(format!("{} in {}", expense.description, group.name)),
            &expense,
        )?;

        Ok(expense)
    }

    /// Remove a single shared expense
    pub fn remove_expense(
        &self,
        group_id: GroupId,
        expense_id: GroupExpenseId,
    ) -> FinVaultResult<GroupExpense> {
        let before = self.require(group_id)?;
        let position = before
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| FinVaultError::expense_not_found(expense_id.to_string()))?;

        let mut group = before.clone();
        let expense = group.expenses.remove(position);
        group.updated_at = chrono::Utc::now();

        self.persist(&group)?;
        self.storage.log_delete(
            EntityType::GroupExpense,
            expense.id.to_string(),
            Some(format!("{} in {}", expense.description, group.name)),
            &expense,
        )?;

        Ok(expense)
    }

    /// Get a group by ID
    pub fn get(&self, id: GroupId) -> FinVaultResult<Option<Group>> {
        self.storage.groups.get(id)
    }

    /// Find a group by name (case-insensitive) or ID
    pub fn find(&self, identifier: &str) -> FinVaultResult<Option<Group>> {
        let wanted = identifier.trim().to_lowercase();
        let groups = self.storage.groups.get_all()?;

        if let Some(group) = groups.iter().find(|g| g.name.to_lowercase() == wanted) {
            return Ok(Some(group.clone()));
        }

        Ok(groups.into_iter().find(|g| g.id.matches(identifier)))
    }

    /// Resolve a member of a group by ID or by an unambiguous name
    pub fn find_member(&self, group: &Group, identifier: &str) -> FinVaultResult<Member> {
        if let Some(member) = group.members.iter().find(|m| m.id.matches(identifier)) {
            return Ok(member.clone());
        }

        match group.members_named(identifier).as_slice() {
            [member] => Ok((*member).clone()),
            [] => Err(FinVaultError::member_not_found(identifier.trim())),
            several => Err(FinVaultError::Validation(format!(
                "{} members are named '{}'; use the member ID instead",
                several.len(),
                identifier.trim()
            ))),
        }
    }

    /// List all groups
    pub fn list(&self) -> FinVaultResult<Vec<Group>> {
        self.storage.groups.get_all()
    }

    /// Groups whose name contains the query, case-insensitively
    pub fn search(&self, query: &str) -> FinVaultResult<Vec<Group>> {
        let query = query.trim().to_lowercase();
        self.storage
            .groups
            .filter(|g| query.is_empty() || g.name.to_lowercase().contains(&query))
    }

    /// Current balances of a group
    pub fn balances(&self, id: GroupId) -> FinVaultResult<Vec<MemberBalance>> {
        Ok(compute_balances(&self.require(id)?))
    }

    /// Plain-text summary of a group
    pub fn share_summary(&self, id: GroupId) -> FinVaultResult<String> {
        Ok(share::share_summary(&self.require(id)?))
    }

    /// Chat link carrying the group summary
    pub fn share_url(&self, id: GroupId, base_url: &str) -> FinVaultResult<String> {
        let summary = self.share_summary(id)?;
        Ok(share::share_url(base_url, &summary))
    }

    fn require(&self, id: GroupId) -> FinVaultResult<Group> {
        self.storage
            .groups
            .get(id)?
            .ok_or_else(|| FinVaultError::group_not_found(id.to_string()))
    }

    fn persist(&self, group: &Group) -> FinVaultResult<()> {
        group
            .validate()
            .map_err(|e| FinVaultError::Validation(e.to_string()))?;

        if !self.storage.groups.replace(group.clone())? {
            return Err(FinVaultError::group_not_found(group.id.to_string()));
        }
        Ok(())
    }

    fn store(&self, before: &Group, after: &Group) -> FinVaultResult<()> {
        self.persist(after)?;
        self.storage.log_update(
            EntityType::Group,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::FinVaultPaths;
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_storage() -> Storage {
        let mut storage = Storage::with_store(Arc::new(MemoryStore::new()));
        storage.load_all().unwrap();
        storage
    }

    fn group_with_members(service: &GroupService, names: &[&str]) -> (Group, Vec<MemberId>) {
        let group = service.create_group("Trip", None).unwrap();
        let ids = names
            .iter()
            .map(|n| service.add_member(group.id, n).unwrap().id)
            .collect();
        (service.get(group.id).unwrap().unwrap(), ids)
    }

    #[test]
    fn test_create_group() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);

        let group = service
            .create_group("  Weekend  ", Some("https://img/x.png".into()))
            .unwrap();
        assert_eq!(group.name, "Weekend");
        assert_eq!(group.avatar.as_deref(), Some("https://img/x.png"));
        assert!(group.members.is_empty());

        // Seed group plus the new one
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_create_group_rejects_blank_name() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);

        let err = service.create_group("   ", None).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_rename_group() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let group = service.create_group("Trip", Some("a.png".into())).unwrap();

        let renamed = service.rename_group(group.id, "Road Trip", None).unwrap();
        assert_eq!(renamed.name, "Road Trip");
        assert!(renamed.avatar.is_none());
        assert_eq!(service.get(group.id).unwrap().unwrap().name, "Road Trip");

        assert!(service
            .rename_group(group.id, "", None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .rename_group(GroupId::new(), "X", None)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_group_removes_balances() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, ids) = group_with_members(&service, &["A", "B"]);
        service.add_expense(group.id, "Fuel", "20", ids[0]).unwrap();

        service.delete_group(group.id).unwrap();

        assert!(service.get(group.id).unwrap().is_none());
        assert!(service.balances(group.id).unwrap_err().is_not_found());
        assert!(service.delete_group(group.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_member_allows_duplicate_names() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, ids) = group_with_members(&service, &["Alex", "Alex"]);

        assert_eq!(group.members.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert!(service
            .add_member(group.id, " ")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_add_expense_and_balances() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, ids) = group_with_members(&service, &["A", "B"]);

        let expense = service.add_expense(group.id, "Dinner", "$20", ids[0]).unwrap();
        assert_eq!(expense.amount, 20.0);
        assert_eq!(expense.paid_by, ids[0]);

        let balances = service.balances(group.id).unwrap();
        assert!((balances[0].amount - 10.0).abs() < 1e-9);
        assert!((balances[1].amount + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_expense_rejects_bad_amounts() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, ids) = group_with_members(&service, &["A", "B"]);

        for amount in ["-5", "abc", "0", "", "NaN", "inf"] {
            let err = service
                .add_expense(group.id, "Dinner", amount, ids[0])
                .unwrap_err();
            assert!(err.is_validation(), "amount {:?} accepted", amount);
        }

        assert!(service.get(group.id).unwrap().unwrap().expenses.is_empty());
    }

    #[test]
    fn test_add_expense_rejects_unknown_payer() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, _) = group_with_members(&service, &["A"]);

        let err = service
            .add_expense(group.id, "Dinner", "10", MemberId::new())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.get(group.id).unwrap().unwrap().expenses.is_empty());
    }

    #[test]
    fn test_add_expense_rejects_blank_description() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, ids) = group_with_members(&service, &["A"]);

        assert!(service
            .add_expense(group.id, "  ", "10", ids[0])
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_remove_expense() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, ids) = group_with_members(&service, &["A", "B"]);
        let expense = service.add_expense(group.id, "Fuel", "30", ids[1]).unwrap();

        service.remove_expense(group.id, expense.id).unwrap();
        assert!(service.get(group.id).unwrap().unwrap().expenses.is_empty());
        assert!(service
            .remove_expense(group.id, expense.id)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_remove_member() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, ids) = group_with_members(&service, &["A", "B"]);
        service.add_expense(group.id, "Fuel", "30", ids[0]).unwrap();

        // A paid, so A stays
        assert!(service
            .remove_member(group.id, ids[0])
            .unwrap_err()
            .is_validation());

        let removed = service.remove_member(group.id, ids[1]).unwrap();
        assert_eq!(removed.name, "B");

        let balances = service.balances(group.id).unwrap();
        assert_eq!(balances.len(), 1);
        assert!(balances[0].amount.abs() < 1e-9);

        assert!(service
            .remove_member(group.id, ids[1])
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_find_and_search() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let trip = service.create_group("Ski Trip", None).unwrap();

        assert_eq!(service.find("ski trip").unwrap().unwrap().id, trip.id);
        assert_eq!(service.find(&trip.id.to_string()).unwrap().unwrap().id, trip.id);
        assert!(service.find("nothing").unwrap().is_none());

        let found = service.search("TRIP").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, trip.id);
        assert_eq!(service.search("").unwrap().len(), 2);
    }

    #[test]
    fn test_find_member() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let (group, ids) = group_with_members(&service, &["Alex", "Alex", "Sam"]);

        assert_eq!(service.find_member(&group, "sam").unwrap().id, ids[2]);
        assert_eq!(
            service.find_member(&group, &ids[1].to_string()).unwrap().id,
            ids[1]
        );
        assert!(service.find_member(&group, "Alex").unwrap_err().is_validation());
        assert!(service.find_member(&group, "Kim").unwrap_err().is_not_found());
    }

    #[test]
    fn test_share_summary_and_url() {
        let storage = create_test_storage();
        let service = GroupService::new(&storage);
        let roommates = service.find("Roommates").unwrap().unwrap();

        let summary = service.share_summary(roommates.id).unwrap();
        assert!(summary.starts_with("Group: Roommates\nMembers: Alice, Bob\nExpenses:\n"));

        let url = service
            .share_url(roommates.id, share::DEFAULT_SHARE_BASE_URL)
            .unwrap();
        assert!(url.starts_with("https://wa.me/?text=Group%3A%20Roommates%0A"));
    }

    #[test]
    fn test_failed_write_leaves_group_unchanged() {
        let store = Arc::new(MemoryStore::new());
        let mut storage = Storage::with_store(store.clone());
        storage.load_all().unwrap();
        let service = GroupService::new(&storage);
        let roommates = service.find("Roommates").unwrap().unwrap();

        store.set_fail_writes(true);
        assert!(service.add_member(roommates.id, "Carol").is_err());
        assert_eq!(service.get(roommates.id).unwrap().unwrap().members.len(), 2);
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinVaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let service = GroupService::new(&storage);

        let group = service.create_group("Trip", None).unwrap();
        let member = service.add_member(group.id, "A").unwrap();
        service.add_expense(group.id, "Fuel", "10", member.id).unwrap();
        service.rename_group(group.id, "Road Trip", None).unwrap();
        service.delete_group(group.id).unwrap();

        let entries = storage.audit_logger().unwrap().read_all().unwrap();
        let operations: Vec<_> = entries.iter().map(|e| (e.operation, e.entity_type)).collect();
        assert_eq!(
            operations,
            vec![
                (Operation::Create, EntityType::Group),
                (Operation::Create, EntityType::Member),
                (Operation::Create, EntityType::GroupExpense),
                (Operation::Update, EntityType::Group),
                (Operation::Delete, EntityType::Group),
            ]
        );
    }
}
