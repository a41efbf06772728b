use poly_algebra::{Bindings, Error, Expression};
use poly_parser::ParseOptions;

/// Splits the given line on `;`, returning each part with its byte offset into the line.
fn split_parts(line: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    line.split(';').map(move |part| {
        let start = offset;
        offset += part.len() + 1;
        (start, part)
    })
}

/// Runs a single request line, returning one output line per result.
///
/// A request is an expression, optionally followed by any number of binding sets separated by
/// `;`. Without bindings, the result is the canonical form of the expression. Otherwise, the
/// expression is evaluated once per binding set. Spans of the returned error point into `line`.
pub fn run(line: &str, options: ParseOptions) -> Result<Vec<String>, Error> {
    let mut parts = split_parts(line);
    let Some((_, source)) = parts.next() else {
        return Ok(Vec::new());
    };

    let expr = Expression::parse_with(source, options)?;
    let mut results = Vec::new();
    for (offset, part) in parts {
        let bindings = part.parse::<Bindings>().map_err(|err| err.offset(offset))?;
        results.push(expr.evaluate_with(&bindings).to_string());
    }

    if results.is_empty() {
        results.push(expr.render());
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use poly_algebra::error::kind;
    use super::*;

    fn run_default(line: &str) -> Result<Vec<String>, Error> {
        run(line, ParseOptions::default())
    }

    #[test]
    fn expression_only() {
        assert_eq!(run_default("a+4-b+10+c").unwrap(), vec!["a-b+c+14"]);
    }

    #[test]
    fn one_result_per_binding_set() {
        assert_eq!(
            run_default("a2b-3c+4 ; a=-5,b=3,c=2 ; c=1 ; ").unwrap(),
            vec!["73", "a2b+1", "a2b-3c+4"],
        );
    }

    #[test]
    fn expression_errors_point_into_line() {
        let err = run_default("(a+b ; a=1").unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn binding_errors_point_into_line() {
        let err = run_default("a+b ; a=1 ; b=").unwrap_err();
        assert!(err.is::<kind::MalformedBinding>());
        assert_eq!(err.spans, vec![12..14]);

        let err = run_default("a+b;a=1,a=2").unwrap_err();
        assert!(err.is::<kind::DuplicateBinding>());
        assert_eq!(err.spans, vec![4..7, 8..11]);
    }
}
