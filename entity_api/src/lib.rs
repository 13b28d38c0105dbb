use log::info;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

pub use entity::{items, Id};

pub mod error;
pub mod item;

const SEED_TITLES: &[&str] = &[
    "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India", "Juliet",
    "Kilo", "Lima", "Mike", "November", "Oscar", "Papa", "Quebec", "Romeo", "Sierra", "Tango",
    "Uniform", "Victor", "Whiskey", "X-ray", "Yankee", "Zulu",
];

const SEED_DESCRIPTIONS: &[&str] = &[
    "Quick brown fox jumps over the lazy dog.",
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    "Batteries included; some assembly required.",
    "This is just sample seed data for testing.",
    "Highly scalable, blazing fast, and developer friendly.",
    "Edge cases included for pagination and search.",
];

/// Tops the items table up to `count` rows of generated sample data.
/// Existing rows are kept; nothing happens when the table already holds
/// at least `count` items.
pub async fn seed_database(db: &DatabaseConnection, count: u64) -> Result<(), error::Error> {
    let existing = items::Entity::find().count(db).await?;

    if existing >= count {
        info!("Database already holds {existing} items, nothing to seed");
        return Ok(());
    }

    let now = chrono::Utc::now();

    for index in existing + 1..=count {
        let (title, description) = sample_item(index);

        items::ActiveModel {
            title: Set(title),
            description: Set(description),
            created_at: Set(now.into()),
            ..Default::default()
        }
        .save(db)
        .await?;
    }

    info!("Seeded {} items", count - existing);
    Ok(())
}

/// Generated title and description for the 1-based seed `index`, cycling
/// through both corpora from the same offset.
fn sample_item(index: u64) -> (String, String) {
    let slot = (index as usize).saturating_sub(1);

    let title = format!("Item {:03} - {}", index, SEED_TITLES[slot % SEED_TITLES.len()]);
    let description = SEED_DESCRIPTIONS[slot % SEED_DESCRIPTIONS.len()].to_owned();

    (title, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_items_cycle_both_corpora_from_the_same_offset() {
        let (title, description) = sample_item(1);
        assert_eq!(title, "Item 001 - Alpha");
        assert_eq!(description, SEED_DESCRIPTIONS[0]);

        // Both corpora wrap on their own lengths
        let (title, _) = sample_item(27);
        assert_eq!(title, "Item 027 - Alpha");

        let (_, description) = sample_item(SEED_DESCRIPTIONS.len() as u64 + 1);
        assert_eq!(description, SEED_DESCRIPTIONS[0]);
    }
}
