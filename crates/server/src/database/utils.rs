/// Turns `RowNotFound` into `Ok(None)`, passing every other error through.
pub fn map_not_found_as_none<T>(result: Result<T, sqlx::Error>) -> Result<Option<T>, sqlx::Error> {
    match result {
        Ok(ok) => Ok(Some(ok)),
        Err(sqlx::Error::RowNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_becomes_none() {
        assert_eq!(map_not_found_as_none(Ok(7)).unwrap(), Some(7));
        assert_eq!(
            map_not_found_as_none::<i32>(Err(sqlx::Error::RowNotFound)).unwrap(),
            None
        );
        assert!(map_not_found_as_none::<i32>(Err(sqlx::Error::PoolTimedOut)).is_err());
    }
}
