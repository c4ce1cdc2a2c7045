use jmex::config::ParserKind;
use jmex::method_extractor::{ExtractOptions, MethodExtractor, MethodRecord};

const REPOSITORY: &str = r#"
package com.example.store;

import java.util.*;
import java.util.function.Function;

/**
 * Keeps {@code Item}s in memory. Braces in docs { are ignored.
 */
@SuppressWarnings({"unchecked", "rawtypes"})
public class Repository<T extends Comparable<T>> implements Iterable<T> {
    private static final String OPEN = "{";
    private final List<T> items = new ArrayList<>();
    private final Comparator<T> order = new Comparator<T>() {
        @Override
        public int compare(T a, T b) { return a.compareTo(b); }
    };

    static {
        System.out.println("loaded");
    }

    public Repository() {
        this(16);
    }

    Repository(int capacity) { }

    @Override
    public Iterator<T> iterator() {
        return items.iterator();
    }

    public <R> List<R> map(Function<? super T, ? extends R> f) throws IllegalStateException {
        List<R> out = new ArrayList<>();
        items.forEach(item -> { out.add(f.apply(item)); });
        return out;
    }

    protected abstract void onChange(T item);

    public enum Mode {
        READ {
            @Override
            boolean writable() { return false; }
        },
        WRITE;

        boolean writable() { return true; }
    }

    interface Listener {
        void changed(Object source);

        default String label() {
            return "}" + OPEN;
        }
    }
}

class Helper {
    static int size(Repository<?> repo) {
        int n = 0;
        for (Object ignored : repo) { n++; }
        return n;
    }
}
"#;

fn extract(parser: ParserKind, include_constructors: bool) -> Vec<MethodRecord> {
    MethodExtractor::new(parser, ExtractOptions { include_constructors })
        .unwrap()
        .extract(REPOSITORY)
        .unwrap()
}

fn names(records: &[MethodRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_realistic_file_extracts_methods_in_source_order() {
    for parser in [ParserKind::TreeSitter, ParserKind::Scanner] {
        let records = extract(parser, false);
        assert_eq!(
            names(&records),
            vec!["iterator", "map", "onChange", "writable", "changed", "label", "size"],
            "parser {:?}",
            parser
        );
        assert_eq!(
            records[0].body.as_deref(),
            Some("{\n        return items.iterator();\n    }")
        );
        assert_eq!(records[2].body, None);
        assert_eq!(records[4].body, None);
        assert_eq!(
            records[5].body.as_deref(),
            Some("{\n            return \"}\" + OPEN;\n        }")
        );
    }
}

#[test]
fn test_constructors_are_named_after_their_type() {
    for parser in [ParserKind::TreeSitter, ParserKind::Scanner] {
        let records = extract(parser, true);
        assert_eq!(
            names(&records)[..4],
            ["Repository", "Repository", "iterator", "map"],
            "parser {:?}",
            parser
        );
        assert_eq!(records[0].body.as_deref(), Some("{\n        this(16);\n    }"));
        assert_eq!(records[1].body.as_deref(), Some("{ }"));
    }
}

#[test]
fn test_parsers_produce_identical_records() {
    for include_constructors in [false, true] {
        assert_eq!(
            extract(ParserKind::TreeSitter, include_constructors),
            extract(ParserKind::Scanner, include_constructors)
        );
    }
}
