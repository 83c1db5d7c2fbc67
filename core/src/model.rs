// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic types and errors for the data model of any application.

use std::fmt;

/// Error to indicate that a value does not satisfy the invariants of its model type.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// A validation problem affecting a single named field of a user-submitted form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    /// Name of the form field that failed validation.
    field: &'static str,

    /// Human-readable explanation of the problem, suitable for display next to the form.
    message: String,
}

impl FieldError {
    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the explanation of the problem.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Collection of validation problems found in a user-submitted form, in the order in which the
/// fields were checked.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Records a new problem with `field`.
    pub fn push<M: Into<String>>(&mut self, field: &'static str, message: M) {
        self.0.push(FieldError { field, message: message.into() });
    }

    /// Returns true if no problems have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the recorded problems.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the names of the fields with problems, in the order they were recorded.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(FieldError::field).collect()
    }

    /// Consumes the collection and yields `value` if there are no problems, or the collection
    /// itself as the error otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&error.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_empty() {
        let errors = FieldErrors::default();
        assert!(errors.is_empty());
        assert_eq!("", errors.to_string());
        assert_eq!(Ok(3), errors.into_result(3));
    }

    #[test]
    fn test_field_errors_some() {
        let mut errors = FieldErrors::default();
        errors.push("title", "Title is missing");
        errors.push("year", "Year is bad".to_owned());

        assert!(!errors.is_empty());
        assert_eq!(vec!["title", "year"], errors.fields());
        assert_eq!("Title is missing; Year is bad", errors.to_string());

        let messages = errors.iter().map(FieldError::message).collect::<Vec<&str>>();
        assert_eq!(vec!["Title is missing", "Year is bad"], messages);

        assert_eq!(Err(errors.clone()), errors.into_result(()));
    }
}
