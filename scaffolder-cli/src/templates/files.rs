//! Built-in generator templates

/// Page component
pub const PAGE: &str = r"import { Link, routes } from '@app/router'

const {{pascalName}}Page = () => {
  return (
    <>
      <h1>{{pascalName}}Page</h1>
      <p>
        Find me in <code>./{{outputPath}}</code>
      </p>
      <p>
        My default route is named <code>{{camelName}}</code>, link to me with `
        <Link to={routes.{{camelName}}()}>{{pascalName}}</Link>`
      </p>
    </>
  )
}

export default {{pascalName}}Page
";

/// Page test
pub const PAGE_TEST: &str = r"import { render } from '@app/testing'

import {{pascalName}}Page from './{{pascalName}}Page'

describe('{{pascalName}}Page', () => {
  it('renders successfully', () => {
    expect(() => {
      render(<{{pascalName}}Page />)
    }).not.toThrow()
  })
})
";

/// Reusable component
pub const COMPONENT: &str = r"const {{pascalName}} = () => {
  return (
    <div>
      <h2>{'{{pascalName}}'}</h2>
      <p>{'Find me in ./{{outputPath}}'}</p>
    </div>
  )
}

export default {{pascalName}}
";

/// Component test
pub const COMPONENT_TEST: &str = r"import { render } from '@app/testing'

import {{pascalName}} from './{{pascalName}}'

describe('{{pascalName}}', () => {
  it('renders successfully', () => {
    expect(() => {
      render(<{{pascalName}} />)
    }).not.toThrow()
  })
})
";

/// Data access service for one model
pub const SERVICE: &str = r"import { db } from 'src/lib/db'

export const {{pluralCamelName}} = () => {
  return db.{{singularCamelName}}.findMany()
}

export const {{singularCamelName}} = ({ {{idName}} }) => {
  return db.{{singularCamelName}}.findUnique({
    where: { {{idName}} },
  })
}

export const create{{singularPascalName}} = ({ input }) => {
  return db.{{singularCamelName}}.create({
    data: input,
  })
}

export const update{{singularPascalName}} = ({ {{idName}}, input }) => {
  return db.{{singularCamelName}}.update({
    data: input,
    where: { {{idName}} },
  })
}

export const delete{{singularPascalName}} = ({ {{idName}} }) => {
  return db.{{singularCamelName}}.delete({
    where: { {{idName}} },
  })
}
";

/// Service test
pub const SERVICE_TEST: &str = r"import {
  {{pluralCamelName}},
  {{singularCamelName}},
  create{{singularPascalName}},
  update{{singularPascalName}},
  delete{{singularPascalName}},
} from './{{pluralCamelName}}'

const {{singularConstantName}}_FIELDS = [{{#each fields}}'{{this}}'{{#unless @last}}, {{/unless}}{{/each}}]

describe('{{pluralCamelName}}', () => {
  it('exports every operation', () => {
    for (const operation of [
      {{pluralCamelName}},
      {{singularCamelName}},
      create{{singularPascalName}},
      update{{singularPascalName}},
      delete{{singularPascalName}},
    ]) {
      expect(typeof operation).toBe('function')
    }
  })

  it('knows the scalar fields of {{singularPascalName}}', () => {
    expect({{singularConstantName}}_FIELDS).toHaveLength({{fieldCount}})
  })
})
";
