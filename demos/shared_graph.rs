//! Custom `Encode` types: conversion hooks, shared nodes and cycle detection.
//!
//! Run with: cargo run --example shared_graph

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use serde_ckt::{encode, Class, Encode, Result, TableSource};

/// A semantic version, written as `major.minor`.
struct Version(u32, u32);

impl Encode for Version {
    fn classify(&self) -> Class<'_> {
        Class::Convert(Box::new(format!("{}.{}", self.0, self.1)))
    }
}

struct Package {
    name: &'static str,
    version: Version,
    depends: Vec<Rc<RefCell<Package>>>,
}

impl TableSource for Package {
    fn visit_entries(&self, visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>) -> Result<()> {
        visitor("name", &self.name)?;
        visitor("version", &self.version)?;
        visitor("depends", &self.depends)
    }
}

fn package(name: &'static str, major: u32, minor: u32) -> Rc<RefCell<Package>> {
    Rc::new(RefCell::new(Package {
        name,
        version: Version(major, minor),
        depends: Vec::new(),
    }))
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let core = package("core", 1, 4);
    let net = package("net", 0, 9);
    let app = package("app", 2, 0);

    net.borrow_mut().depends.push(Rc::clone(&core));
    app.borrow_mut().depends.push(Rc::clone(&core));
    app.borrow_mut().depends.push(Rc::clone(&net));

    // `core` is reachable twice but never from inside itself.
    println!("Dependency tree:\n{}\n", encode(&app, 2usize)?);

    let built = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).single();
    println!("Built at: {}\n", encode(&vec![built], "  ")?);

    core.borrow_mut().depends.push(Rc::clone(&app));
    match encode(&app, 2usize) {
        Ok(_) => println!("unexpectedly encoded a cycle"),
        Err(err) => println!("After adding core -> app: {}", err),
    }
    core.borrow_mut().depends.clear();

    Ok(())
}
