//! Registering a wrapper for an application type.
//!
//! Run with `cargo run -p sql-interp --example custom_type`.

use std::sync::Arc;

use sql_interp::{args, Esc, Fragment, Result, SqlInterp, SqlValue, TypeRegistry};

#[derive(Debug)]
struct Coordinates {
    lat: f64,
    lon: f64,
}

#[derive(Debug)]
struct CoordinatesEsc(Arc<Coordinates>);

impl Esc for CoordinatesEsc {
    fn set_update_ctxt(&self) -> Result<Fragment> {
        let (sql, bind) = self.default_ctxt()?;
        Ok((format!("location = {sql}"), bind))
    }

    fn default_ctxt(&self) -> Result<Fragment> {
        Ok((
            String::from("ST_Point(?, ?)"),
            vec![SqlValue::Float(self.0.lon), SqlValue::Float(self.0.lat)],
        ))
    }
}

fn main() -> Result<()> {
    let mut types = TypeRegistry::empty();
    types.register::<Coordinates, _>(|coords| Box::new(CoordinatesEsc(coords)));
    let interp = SqlInterp::with_types(types);

    let here = || {
        SqlValue::custom(Coordinates {
            lat: 52.52,
            lon: 13.405,
        })
    };

    let (sql, bind) = interp.interp(args![
        "SELECT name FROM places WHERE ST_Distance(location,",
        here(),
        ") < 1000 AND kind IN",
        vec!["cafe", "bakery"],
    ])?;
    println!("{sql}");
    println!("{bind:?}");

    let (sql, bind) = interp.interp(args!["UPDATE places SET", here(), "WHERE id =", 7])?;
    println!("{sql}");
    println!("{bind:?}");

    Ok(())
}
