// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters

//! Binding context integration tests.
//!
//! Exercises the public API only: concurrent registration and interning
//! against a shared context, generated type graphs, and reader/writer
//! contexts built over one provider.

use std::sync::Arc;
use std::thread;
use xbind::model::{BuiltinType, ElementRef, FieldInfo, PackageInfo, TypeInfoBuilder, ValueType};
use xbind::{BindingContext, CacheMode, NameToken, TypeKey, TypeUniverse};

const THREADS: usize = 8;

/// Library catalog: books with authors, chapters and a choice of media.
fn catalog() -> Arc<TypeUniverse> {
    let universe = TypeUniverse::new()
        .with_package(PackageInfo::new("org.library", "urn:library"))
        .with_type(
            TypeInfoBuilder::class("org.library.Catalog")
                .root_element("catalog")
                .property(FieldInfo::attribute("owner", BuiltinType::String).required())
                .property(FieldInfo::element(
                    "book",
                    ValueType::list_of(ValueType::named("org.library.Book")),
                ))
                .build(),
        )
        .with_type(
            TypeInfoBuilder::class("org.library.Book")
                .xml_type("BookType")
                .property(FieldInfo::attribute("isbn", BuiltinType::String).required())
                .property(FieldInfo::element("title", BuiltinType::String).required())
                .property(FieldInfo::element("author", ValueType::named("org.library.Person")))
                .property(FieldInfo::element(
                    "chapter",
                    ValueType::list_of(ValueType::named("org.library.Chapter")),
                ))
                .property(FieldInfo::choice(
                    "media",
                    ValueType::named("org.library.Media"),
                    vec![
                        ElementRef::new("paper", ValueType::named("org.library.Paper")),
                        ElementRef::new("ebook", ValueType::named("org.library.Ebook")),
                    ],
                ))
                .build(),
        )
        .with_type(
            TypeInfoBuilder::class("org.library.Person")
                .xml_type("PersonType")
                .property(FieldInfo::element("name", BuiltinType::String))
                .property(FieldInfo::element("born", BuiltinType::Calendar).with_schema_type("date"))
                .build(),
        )
        .with_type(
            TypeInfoBuilder::class("org.library.Chapter")
                .xml_type("ChapterType")
                .property(FieldInfo::element("heading", BuiltinType::String))
                .property(FieldInfo::element("pages", BuiltinType::PrimitiveInt))
                .property(FieldInfo::element(
                    "section",
                    ValueType::list_of(ValueType::named("org.library.Chapter")),
                ))
                .build(),
        )
        .with_type(
            TypeInfoBuilder::class("org.library.Media")
                .xml_type("MediaType")
                .property(FieldInfo::element("available", BuiltinType::PrimitiveBoolean))
                .build(),
        )
        .with_type(
            TypeInfoBuilder::class("org.library.Paper")
                .xml_type("PaperType")
                .extends("org.library.Media")
                .property(FieldInfo::element("weight", BuiltinType::Double))
                .build(),
        )
        .with_type(
            TypeInfoBuilder::class("org.library.Ebook")
                .xml_type("EbookType")
                .extends("org.library.Media")
                .property(FieldInfo::element("format", BuiltinType::String))
                .build(),
        );
    Arc::new(universe)
}

/// Chain of `n` types where type `i` references `i + 1`, `2i` and itself.
fn generated_graph(n: usize, seed: u64) -> Arc<TypeUniverse> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut universe = TypeUniverse::new();

    for i in 0..n {
        let mut targets = vec![i + 1, i * 2, i];
        targets.sort_unstable();
        targets.dedup();
        rng.shuffle(&mut targets);

        let mut builder = TypeInfoBuilder::class(format!("gen.T{}", i)).xml_type(format!("T{}", i));
        if i == 0 {
            builder = builder.root_element("t0");
        }
        for target in targets.into_iter().filter(|t| *t < n) {
            builder = builder.property(FieldInfo::element(
                format!("to{}", target),
                ValueType::named(format!("gen.T{}", target)),
            ));
        }
        universe.register(builder.build());
    }
    Arc::new(universe)
}

#[test]
fn test_concurrent_register_scans_once() {
    let ctx = Arc::new(
        BindingContext::new("org.library.Catalog", catalog(), CacheMode::Writer).expect("context"),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                ctx.register().expect("register");
                ctx.descriptor(&TypeKey::new("org.library.Book"))
                    .expect("book descriptor")
            })
        })
        .collect();

    let descriptors: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("register thread panicked"))
        .collect();

    for desc in &descriptors[1..] {
        assert!(Arc::ptr_eq(&descriptors[0], desc));
    }
    assert_eq!(ctx.descriptor_count(), 7);
}

#[test]
fn test_concurrent_interning_against_registered_names() {
    let ctx = Arc::new(
        BindingContext::new("org.library.Catalog", catalog(), CacheMode::Reader).expect("context"),
    );
    ctx.register().expect("register");

    let names = ["book", "title", "author", "chapter", "paper", "ebook", "fresh", "another"];
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let mut rng = fastrand::Rng::with_seed(t as u64);
                let mut order = names.to_vec();
                rng.shuffle(&mut order);
                order
                    .into_iter()
                    .map(|name| ctx.intern(name))
                    .collect::<Vec<NameToken>>()
            })
        })
        .collect();

    let tokens: Vec<NameToken> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("intern thread panicked"))
        .collect();

    for token in &tokens {
        let canonical = ctx.intern(token.as_str());
        assert!(NameToken::ptr_eq(token, &canonical), "{} interned twice", token);
    }

    // Names interned during scanning are the canonical ones.
    let catalog = ctx
        .descriptor(&TypeKey::new("org.library.Catalog"))
        .expect("catalog");
    let book = catalog
        .prop_order()
        .iter()
        .find(|p| p.xml_name.as_str() == "book")
        .expect("book entry");
    assert!(NameToken::ptr_eq(&book.xml_name, &ctx.intern("book")));
}

#[test]
fn test_reader_and_writer_share_provider() {
    let universe = catalog();
    let reader = BindingContext::new("org.library.Catalog", universe.clone(), CacheMode::Reader)
        .expect("reader");
    let writer = BindingContext::new("org.library.Catalog", universe, CacheMode::Writer)
        .expect("writer");

    let reader = thread::spawn(move || {
        reader.register().expect("reader register");
        reader
    });
    writer.register().expect("writer register");
    let reader = reader.join().expect("reader thread panicked");

    let book_r = reader
        .descriptor(&TypeKey::new("org.library.Book"))
        .expect("book");
    let book_w = writer
        .descriptor(&TypeKey::new("org.library.Book"))
        .expect("book");

    assert_eq!(
        book_r.attribute_accessor("isbn").map(|a| a.method_name()),
        Some("setIsbn")
    );
    assert!(book_w.attribute_accessors().is_empty());
    assert_eq!(
        book_w.element_accessor("title").map(|a| a.method_name()),
        Some("getTitle")
    );

    // Choice alternatives resolve to the shared media accessor.
    assert_eq!(
        book_w.element_accessor("ebook").map(|a| a.method_name()),
        Some("getMedia")
    );
    assert_eq!(
        writer.element_type("paper"),
        Some(ValueType::named("org.library.Paper"))
    );

    let required = reader
        .required_names(&TypeKey::new("org.library.Book"))
        .expect("required");
    assert!(required.contains("isbn"));
    assert!(required.contains("title"));
    assert_eq!(required.len(), 2);
}

#[test]
fn test_recursive_collections_terminate() {
    let ctx = BindingContext::new("org.library.Catalog", catalog(), CacheMode::Writer).expect("context");
    ctx.register().expect("register");

    let chapter = ctx
        .descriptor(&TypeKey::new("org.library.Chapter"))
        .expect("chapter");
    assert_eq!(
        chapter.element_accessor("section").map(|a| a.method_name()),
        Some("getSection")
    );
    assert_eq!(
        ctx.element_type("section"),
        Some(ValueType::named("org.library.Chapter"))
    );
}

#[test]
fn test_generated_graphs_register_every_type() {
    for (n, seed) in [(1usize, 1u64), (10, 2), (64, 3), (200, 4)] {
        let ctx = BindingContext::new("gen.T0", generated_graph(n, seed), CacheMode::Writer)
            .expect("context");
        ctx.register().expect("register");

        assert_eq!(ctx.descriptor_count(), n, "graph of {} types", n);
        for i in 0..n {
            assert!(ctx.is_registered(&TypeKey::new(format!("gen.T{}", i))));
        }
    }
}

#[test]
fn test_namespaces_resolve_without_registration() {
    let ctx = BindingContext::new("org.library.Catalog", catalog(), CacheMode::Reader).expect("context");

    // The root namespace is resolved when the context is built.
    assert_eq!(
        ctx.namespace_of(&TypeKey::new("org.library.Catalog")).as_deref(),
        Some("urn:library")
    );
    assert_eq!(
        ctx.namespace_of(&TypeKey::new("org.library.Person")).as_deref(),
        Some("urn:library")
    );
    assert_eq!(ctx.namespace_of(&TypeKey::new("org.unknown.Thing")), None);
    assert!(ctx.descriptor(&TypeKey::new("org.library.Person")).is_none());
}
