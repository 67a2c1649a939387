//! Condition runtime embedded in generated components.
//!
//! Must stay in step with `formsmith_logic::condition` and
//! `formsmith_logic::visibility`: the preview and the exported form decide
//! visibility the same way.

pub const JSX: &str = r#"
function toText(value) {
  if (value === undefined || value === null) return '';
  return Array.isArray(value) ? value.join(',') : String(value);
}

function isEmptyValue(value) {
  if (value === undefined || value === null) return true;
  return Array.isArray(value) ? value.length === 0 : !value;
}

function isCheckedValue(value, expected) {
  if (value === undefined || value === null) return false;
  if (Array.isArray(value)) return expected ? value.includes(expected) : value.length > 0;
  if (typeof value === 'string') return expected ? value === expected : value !== '' && value !== 'false';
  if (typeof value === 'boolean') return value;
  return value === 1;
}

function isMember(value, expected) {
  const allowed = expected.split(',').map((item) => item.trim());
  if (value === undefined || value === null) return false;
  if (Array.isArray(value)) return value.some((item) => allowed.includes(item));
  return allowed.includes(toText(value));
}

function evaluateCondition(rule, values) {
  const current = values[rule.field];
  const expected = rule.value ?? '';
  switch (rule.operator) {
    case 'equals':
      return current !== undefined && current == expected;
    case 'notEquals':
      return !(current !== undefined && current == expected);
    case 'contains':
      return toText(current).includes(expected);
    case 'startsWith':
      return toText(current).startsWith(expected);
    case 'endsWith':
      return toText(current).endsWith(expected);
    case 'greaterThan':
      return parseFloat(toText(current)) > parseFloat(expected);
    case 'lessThan':
      return parseFloat(toText(current)) < parseFloat(expected);
    case 'isEmpty':
      return isEmptyValue(current);
    case 'isNotEmpty':
      return !isEmptyValue(current);
    case 'matches':
      try {
        return new RegExp(expected).test(toText(current));
      } catch (err) {
        return false;
      }
    case 'in':
      return isMember(current, expected);
    case 'notIn':
      return !isMember(current, expected);
    case 'checked':
    case 'isChecked':
    case 'true':
    case 'isTrue':
      return isCheckedValue(current, expected);
    case 'notChecked':
    case 'false':
      return !isCheckedValue(current, expected);
    default:
      return true;
  }
}

function isFieldVisible(logic, values) {
  if (!logic || !logic.rules || logic.rules.length === 0) return true;
  const results = logic.rules.map((rule) => evaluateCondition(rule, values));
  const matched = logic.combinator === 'OR' ? results.some(Boolean) : results.every(Boolean);
  if (logic.action === 'show') return matched;
  if (logic.action === 'hide') return !matched;
  return true;
}
"#;

pub const TSX: &str = r#"
type FormValue = string | string[] | boolean | number;
type FormValues = Record<string, FormValue | undefined>;

interface Rule {
  field: string;
  operator: string;
  value?: string;
}

interface ConditionalLogic {
  rules: Rule[];
  combinator: string;
  action: string;
}

function toText(value: FormValue | undefined): string {
  if (value === undefined || value === null) return '';
  return Array.isArray(value) ? value.join(',') : String(value);
}

function isEmptyValue(value: FormValue | undefined): boolean {
  if (value === undefined || value === null) return true;
  return Array.isArray(value) ? value.length === 0 : !value;
}

function isCheckedValue(value: FormValue | undefined, expected: string): boolean {
  if (value === undefined || value === null) return false;
  if (Array.isArray(value)) return expected ? value.includes(expected) : value.length > 0;
  if (typeof value === 'string') return expected ? value === expected : value !== '' && value !== 'false';
  if (typeof value === 'boolean') return value;
  return value === 1;
}

function isMember(value: FormValue | undefined, expected: string): boolean {
  const allowed = expected.split(',').map((item) => item.trim());
  if (value === undefined || value === null) return false;
  if (Array.isArray(value)) return value.some((item) => allowed.includes(item));
  return allowed.includes(toText(value));
}

function evaluateCondition(rule: Rule, values: FormValues): boolean {
  const current = values[rule.field];
  const expected = rule.value ?? '';
  switch (rule.operator) {
    case 'equals':
      // eslint-disable-next-line eqeqeq
      return current !== undefined && (current as unknown) == expected;
    case 'notEquals':
      // eslint-disable-next-line eqeqeq
      return !(current !== undefined && (current as unknown) == expected);
    case 'contains':
      return toText(current).includes(expected);
    case 'startsWith':
      return toText(current).startsWith(expected);
    case 'endsWith':
      return toText(current).endsWith(expected);
    case 'greaterThan':
      return parseFloat(toText(current)) > parseFloat(expected);
    case 'lessThan':
      return parseFloat(toText(current)) < parseFloat(expected);
    case 'isEmpty':
      return isEmptyValue(current);
    case 'isNotEmpty':
      return !isEmptyValue(current);
    case 'matches':
      try {
        return new RegExp(expected).test(toText(current));
      } catch (err) {
        return false;
      }
    case 'in':
      return isMember(current, expected);
    case 'notIn':
      return !isMember(current, expected);
    case 'checked':
    case 'isChecked':
    case 'true':
    case 'isTrue':
      return isCheckedValue(current, expected);
    case 'notChecked':
    case 'false':
      return !isCheckedValue(current, expected);
    default:
      return true;
  }
}

function isFieldVisible(logic: ConditionalLogic | undefined, values: FormValues): boolean {
  if (!logic || !logic.rules || logic.rules.length === 0) return true;
  const results = logic.rules.map((rule) => evaluateCondition(rule, values));
  const matched = logic.combinator === 'OR' ? results.some(Boolean) : results.every(Boolean);
  if (logic.action === 'show') return matched;
  if (logic.action === 'hide') return !matched;
  return true;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_core::enums::Operator;

    #[test]
    fn runtimes_handle_every_operator() {
        for op in Operator::BUILTIN {
            let case = format!("case '{}':", op.as_str());
            assert!(JSX.contains(&case), "jsx runtime misses {op}");
            assert!(TSX.contains(&case), "tsx runtime misses {op}");
        }
    }

    #[test]
    fn runtimes_fail_open() {
        assert!(JSX.contains("default:\n      return true;"));
        assert!(TSX.contains("default:\n      return true;"));
    }
}
