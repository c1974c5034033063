//! Display-ready projections of person records

use serde::Serialize;

use crate::bio::{BioIndex, BioKind};
use crate::dates::{self, Zodiac};
use crate::model::{Person, PersonId, Sex};
use crate::store::PersonStore;

/// Denormalized person without relation arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonBrief {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub birth_day: String,
    pub death_day: String,
    pub photo: String,
    pub children_count: usize,
    pub age: Option<String>,
}

/// Everything a person page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCard {
    #[serde(flatten)]
    pub person: Person,
    pub father: Option<PersonBrief>,
    pub mother: Option<PersonBrief>,
    pub spouses: Vec<PersonBrief>,
    pub children: Vec<PersonBrief>,
    pub photos: Vec<String>,
    pub age: Option<String>,
    pub zodiac: Option<Zodiac>,
    pub has_open_bio: bool,
    pub has_locked_bio: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPage {
    pub total: usize,
    pub offset: usize,
    pub items: Vec<PersonBrief>,
}

impl PersonStore {
    pub fn brief_of(&self, person: &Person) -> PersonBrief {
        PersonBrief {
            id: person.id,
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            sex: person.sex,
            birth_day: person.birth_day.clone(),
            death_day: person.death_day.clone(),
            photo: self.photos().default_photo(person.id, person.sex),
            children_count: person.children_ids.len(),
            age: dates::calculate_age(&person.birth_day, &person.death_day),
        }
    }

    pub fn brief(&self, id: PersonId) -> Option<PersonBrief> {
        self.get(id).map(|p| self.brief_of(p))
    }

    /// Briefs for the ids that resolve, in the given order.
    pub fn briefs(&self, ids: &[PersonId]) -> Vec<PersonBrief> {
        ids.iter().filter_map(|id| self.brief(*id)).collect()
    }

    pub fn card(&self, id: PersonId, bios: &dyn BioIndex) -> Option<PersonCard> {
        let person = self.get(id)?;
        Some(PersonCard {
            father: self.brief(person.father_id),
            mother: self.brief(person.mother_id),
            spouses: self.briefs(&person.spouse_ids),
            children: self.briefs(&person.children_ids),
            photos: self.photos().photos(id),
            age: dates::calculate_age(&person.birth_day, &person.death_day),
            zodiac: dates::get_zodiac(&person.birth_day),
            has_open_bio: bios.has_bio(BioKind::Open, id),
            has_locked_bio: bios.has_bio(BioKind::Locked, id),
            person: person.clone(),
        })
    }

    /// One page of briefs in id order.
    pub fn list_page(&self, offset: usize, limit: usize) -> PersonPage {
        let items = self
            .sorted_persons()
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|p| self.brief_of(p))
            .collect();
        PersonPage {
            total: self.len(),
            offset,
            items,
        }
    }

    /// Favorite people in slot order, skipping ids that no longer resolve.
    pub fn favorite_briefs(&self) -> Vec<PersonBrief> {
        let ids: Vec<PersonId> = self.favorites().ids().collect();
        self.briefs(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::NoBio;
    use crate::photos::PhotoIndex;

    fn store() -> PersonStore {
        let mut father = Person::new(PersonId(1), Sex::Male, "Пётр", "Иванов");
        father.birth_day = "01.01.1900".into();
        father.death_day = "01.01.1970".into();
        let mut child = Person::new(PersonId(2), Sex::Female, "Мария", "Иванова");
        child.birth_day = "25.12.1930".into();
        child.death_day = "1990".into();
        child.spouse_ids = vec![PersonId(9)];
        let mut store = PersonStore::from_persons([father, child])
            .with_photos(PhotoIndex::from_filenames(["2#1.jpg", "2#3.jpg"]));
        store.set_parents(PersonId(2), PersonId(1), PersonId::NONE);
        store
    }

    #[test]
    fn test_brief_resolves_photo_and_age() {
        let store = store();
        let brief = store.brief(PersonId(1)).unwrap();
        assert_eq!(brief.photo, "m.jpg");
        assert_eq!(brief.age.as_deref(), Some("70 лет"));
        assert_eq!(brief.children_count, 1);
        assert_eq!(store.brief(PersonId(2)).unwrap().photo, "2#1.jpg");
        assert!(store.brief(PersonId(5)).is_none());
    }

    #[test]
    fn test_card_skips_dangling_relations() {
        let store = store();
        let card = store.card(PersonId(2), &NoBio).unwrap();
        assert_eq!(card.father.as_ref().unwrap().id, PersonId(1));
        assert!(card.mother.is_none());
        assert!(card.spouses.is_empty());
        assert_eq!(card.photos, vec!["2#1.jpg", "2#3.jpg"]);
        assert_eq!(card.zodiac.unwrap().name, "Козерог");
        assert!(!card.has_open_bio);
    }

    #[test]
    fn test_list_page_orders_by_id() {
        let store = store();
        let page = store.list_page(1, 10);
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, PersonId(2));
    }
}
