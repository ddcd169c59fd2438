//! Conversions between database rows and API transfer objects

use super::{
    book::{Book, BookDto},
    person::{Person, PersonDto},
};

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            author: book.author,
            year: book.year,
            owner: book.person_id,
            taken_at: book.taken_at,
            expired: false,
        }
    }
}

impl From<BookDto> for Book {
    fn from(dto: BookDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            author: dto.author,
            year: dto.year,
            person_id: dto.owner,
            taken_at: dto.taken_at,
        }
    }
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            books: Vec::new(),
        }
    }
}

/// Held books are a back-reference and are not carried into the row.
impl From<PersonDto> for Person {
    fn from(dto: PersonDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

pub fn to_book_dtos(books: Vec<Book>) -> Vec<BookDto> {
    books.into_iter().map(BookDto::from).collect()
}

pub fn to_person_dtos(people: Vec<Person>) -> Vec<PersonDto> {
    people.into_iter().map(PersonDto::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn lent_book() -> Book {
        Book {
            id: 1,
            name: "Dune".to_string(),
            author: "Herbert".to_string(),
            year: 1965,
            person_id: Some(7),
            taken_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_lent_book_keeps_lending_pair() {
        let dto = BookDto::from(lent_book());
        assert_eq!(dto.owner, Some(7));
        assert_eq!(dto.taken_at, lent_book().taken_at);
        assert!(!dto.expired);

        assert_eq!(Book::from(dto), lent_book());
    }

    #[test]
    fn test_shelved_book_stays_shelved() {
        let shelved = Book {
            person_id: None,
            taken_at: None,
            ..lent_book()
        };
        let dto = BookDto::from(shelved.clone());
        assert_eq!(dto.owner, None);
        assert_eq!(dto.taken_at, None);
        assert_eq!(Book::from(dto), shelved);
    }

    #[test]
    fn test_person_dto_drops_books_on_the_way_back() {
        let dto = PersonDto {
            id: 7,
            name: "Alice".to_string(),
            books: vec![BookDto::from(lent_book())],
        };
        assert_eq!(
            Person::from(dto),
            Person {
                id: 7,
                name: "Alice".to_string()
            }
        );
    }

    #[test]
    fn test_lists_preserve_order() {
        let second = Book {
            id: 2,
            name: "Emma".to_string(),
            ..lent_book()
        };
        let ids: Vec<i32> = to_book_dtos(vec![lent_book(), second])
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let people = to_person_dtos(vec![Person {
            id: 3,
            name: "Bob".to_string(),
        }]);
        assert_eq!(people[0].name, "Bob");
        assert!(people[0].books.is_empty());
    }
}
