use sqlx::FromRow;

/// A row of the `authors` table.
#[derive(Default, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Author {
    pub id:   i64,
    pub name: String,
    pub bio:  String,
}

/// Update applied to a single column by a partial update.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    SetTo(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::SetTo(_))
    }

    /// The new value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            FieldUpdate::Unchanged => None,
            FieldUpdate::SetTo(value) => Some(value),
        }
    }

    /// Resolve against the currently stored value.
    pub fn apply(self, current: T) -> T {
        match self {
            FieldUpdate::Unchanged => current,
            FieldUpdate::SetTo(value) => value,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldUpdate::SetTo(value),
            None => FieldUpdate::Unchanged,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CreateAuthorParams {
    pub name: String,
    pub bio:  String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct UpdateAuthorParams {
    pub id:   i64,
    pub name: String,
    pub bio:  String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct PartialUpdateAuthorParams {
    pub id:   i64,
    pub name: FieldUpdate<String>,
    pub bio:  FieldUpdate<String>,
}

impl PartialUpdateAuthorParams {
    /// Apply the update to a copy of `author`, leaving unset fields untouched.
    pub fn apply(self, author: &Author) -> Author {
        Author {
            id:   author.id,
            name: self.name.apply(author.name.clone()),
            bio:  self.bio.apply(author.bio.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn author() -> Author {
        Author {
            id:   7,
            name: "Ursula K. Le Guin".into(),
            bio:  "Wrote Earthsea".into(),
        }
    }

    #[test]
    fn field_update_from_option() {
        assert_eq!(FieldUpdate::from(Some("x")), FieldUpdate::SetTo("x"));
        assert_eq!(FieldUpdate::<&str>::from(None), FieldUpdate::Unchanged);
    }

    #[test]
    fn empty_string_is_a_real_update() {
        let params = PartialUpdateAuthorParams {
            id:   7,
            name: FieldUpdate::Unchanged,
            bio:  FieldUpdate::SetTo(String::new()),
        };
        assert!(params.bio.is_set());
        assert_eq!(
            params.apply(&author()),
            Author {
                bio: String::new(),
                ..author()
            }
        );
    }

    #[test]
    fn unchanged_keeps_row() {
        let params = PartialUpdateAuthorParams {
            id: 7,
            ..Default::default()
        };
        assert_eq!(params.apply(&author()), author());
    }
}
