//! Delimited-list parameter scalars.
//!
//! Array parameters travel as a single comma-separated value because the
//! transport only knows flat key/value pairs.

use std::fmt;

use serde::{Serialize, Serializer};

macro_rules! csv_list {
    ($(#[$meta:meta])* $name:ident, $elem:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name(pub Vec<$elem>);

        impl $name {
            /// Returns `true` if the list has no elements.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Number of elements in the list.
            pub fn len(&self) -> usize {
                self.0.len()
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(values: Vec<$elem>) -> Self {
                Self(values)
            }
        }

        impl FromIterator<$elem> for $name {
            fn from_iter<I: IntoIterator<Item = $elem>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for (idx, value) in self.0.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    };
}

csv_list!(
    /// Integer array parameter, encoded as `1,2,3`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use rpcbind::CsvIntList;
    ///
    /// let ids: CsvIntList = [1, 20, 300].into_iter().collect();
    /// assert_eq!(ids.to_string(), "1,20,300");
    /// ```
    CsvIntList,
    i64
);

csv_list!(
    /// String array parameter, encoded as `a,b,c`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use rpcbind::CsvStringList;
    ///
    /// let fields = CsvStringList::from(vec!["sex".to_string(), "bdate".to_string()]);
    /// assert_eq!(fields.to_string(), "sex,bdate");
    /// ```
    CsvStringList,
    String
);
