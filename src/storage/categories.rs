//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = CategoryData {
            categories: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all categories ordered by name
    pub fn get_all(&self) -> Result<Vec<Category>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// Get a category by exact (trimmed, case-sensitive) name
    pub fn find_by_name(&self, name: &str) -> Result<Option<Category>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let name = name.trim();
        Ok(data.values().find(|c| c.name == name).cloned())
    }

    /// Return the category named `name`, inserting the one built by `create`
    /// if none exists. Lookup and insert share one write lock.
    pub fn get_or_insert_with<F>(
        &self,
        name: &str,
        create: F,
    ) -> Result<(Category, bool), LedgerError>
    where
        F: FnOnce(&str) -> Category,
    {
        let mut data = self.data.write().map_err(lock_error)?;

        let name = name.trim();
        if let Some(existing) = data.values().find(|c| c.name == name) {
            return Ok((existing.clone(), false));
        }

        let category = create(name);
        data.insert(category.id, category.clone());
        Ok((category, true))
    }

    pub fn upsert(&self, category: Category) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;

        data.insert(category.id, category);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let category = Category::new("Groceries", CategoryKind::Expense);
        let id = category.id;
        repo.upsert(category).unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().name, "Groceries");
    }

    #[test]
    fn test_get_or_insert_with() {
        let (_temp_dir, repo) = create_test_repo();

        let (first, created) = repo
            .get_or_insert_with("Dining", |name| Category::new(name, CategoryKind::Expense))
            .unwrap();
        assert!(created);

        let (second, created) = repo
            .get_or_insert_with("Dining", |name| Category::new(name, CategoryKind::Expense))
            .unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_find_by_name_preserves_case() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Category::new("Travel", CategoryKind::Expense))
            .unwrap();

        assert!(repo.find_by_name("Travel").unwrap().is_some());
        assert!(repo.find_by_name("travel").unwrap().is_none());
    }
}
